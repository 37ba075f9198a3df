//! Extracts the authenticated user from the bearer token of a request.
//!
//! Add [Claims] as an argument to a handler to require authentication on a route.

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{
    Error,
    auth::token::{Claims, TokenKeys},
};

impl<S> FromRequestParts<S> for Claims
where
    TokenKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::MissingToken)?;

        let token = bearer.token();

        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        TokenKeys::from_ref(state).verify(token)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        http::{HeaderValue, StatusCode, header},
        routing::get,
    };
    use axum_test::TestServer;
    use time::{Duration, OffsetDateTime};

    use crate::{
        UserID,
        auth::token::{Claims, DEFAULT_TOKEN_DURATION, TokenKeys},
    };

    const SECRET: &str = "averysecretsecret";

    async fn handler_with_auth(claims: Claims) -> Json<UserID> {
        Json(claims.user_id)
    }

    fn get_test_server() -> TestServer {
        let app = Router::new()
            .route("/protected", get(handler_with_auth))
            .with_state(TokenKeys::new(SECRET, DEFAULT_TOKEN_DURATION));

        TestServer::new(app)
    }

    #[tokio::test]
    async fn valid_token_is_accepted() {
        let server = get_test_server();
        let token = TokenKeys::new(SECRET, DEFAULT_TOKEN_DURATION)
            .issue(&UserID::new("u1"), "alice@example.com")
            .unwrap();

        let response = server
            .get("/protected")
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<UserID>(), UserID::new("u1"));
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let server = get_test_server();

        let response = server.get("/protected").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<serde_json::Value>(),
            serde_json::json!({"error": "Access token required"})
        );
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let server = get_test_server();

        let response = server
            .get("/protected")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_static("Basic YWxpY2U6cHc="),
            )
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_forbidden() {
        let server = get_test_server();

        let response = server
            .get("/protected")
            .authorization_bearer("garbage")
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(
            response.json::<serde_json::Value>(),
            serde_json::json!({"error": "Invalid token"})
        );
    }

    #[tokio::test]
    async fn token_with_wrong_secret_is_forbidden() {
        let server = get_test_server();
        let token = TokenKeys::new("anothersecret", DEFAULT_TOKEN_DURATION)
            .issue(&UserID::new("u1"), "alice@example.com")
            .unwrap();

        let response = server
            .get("/protected")
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn expired_token_is_forbidden() {
        let server = get_test_server();
        let issued_at = OffsetDateTime::now_utc() - Duration::days(8);
        let token = TokenKeys::new(SECRET, DEFAULT_TOKEN_DURATION)
            .issue_at(&UserID::new("u1"), "alice@example.com", issued_at)
            .unwrap();

        let response = server
            .get("/protected")
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }
}
