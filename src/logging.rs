//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::{StatusCode, request, response},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::error::{INTERNAL_ERROR_MESSAGE, error_response};

/// Bodies longer than this many characters are truncated in the `info` log.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest body the middleware will buffer, matching axum's default body limit.
const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// JSON fields whose values must never be written to the logs.
const REDACTED_FIELDS: [&str; 2] = ["password", "token"];

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
/// Headers are not logged so that bearer tokens stay out of the logs.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match to_bytes(body, MAX_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!("Could not read request body: {error}");
            return error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body is too large",
            );
        }
    };

    log_request(&parts, &display_body(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE);
        }
    };

    log_response(&parts, &display_body(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Convert a body into text that is safe to log.
///
/// JSON bodies have sensitive fields redacted. Anything else that is not
/// empty is summarized by its size, since it cannot be checked for secrets.
fn display_body(body: &Bytes) -> String {
    if body.is_empty() {
        return String::new();
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(mut value) => {
            redact_fields(&mut value);
            value.to_string()
        }
        Err(_) => format!("<{} bytes of non-JSON data>", body.len()),
    }
}

fn redact_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                if REDACTED_FIELDS.contains(&key.as_str()) {
                    *value = Value::String("********".to_owned());
                } else {
                    redact_fields(value);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_fields),
        _ => {}
    }
}

fn truncate(body: &str) -> Option<String> {
    if body.chars().count() > LOG_BODY_LENGTH_LIMIT {
        Some(body.chars().take(LOG_BODY_LENGTH_LIMIT).collect())
    } else {
        None
    }
}

fn log_request(parts: &request::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!(
                "Received request: {} {}\nbody: {truncated}...",
                parts.method,
                parts.uri
            );
            tracing::debug!("Full request body: {body}");
        }
        None => tracing::info!(
            "Received request: {} {}\nbody: {body}",
            parts.method,
            parts.uri
        ),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {}\nbody: {truncated}...", parts.status);
            tracing::debug!("Full response body: {body}");
        }
        None => tracing::info!("Sending response: {}\nbody: {body}", parts.status),
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, body::Bytes, http::StatusCode, middleware, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use super::{LOG_BODY_LENGTH_LIMIT, MAX_BODY_SIZE, display_body, logging_middleware, truncate};

    async fn echo(Json(body): Json<Value>) -> Json<Value> {
        Json(body)
    }

    fn get_echo_server() -> TestServer {
        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));

        TestServer::new(app)
    }

    #[test]
    fn display_body_redacts_passwords_and_tokens() {
        let body = Bytes::from(
            json!({
                "email": "alice@x.com",
                "password": "pw123456",
                "nested": {"token": "abc.def.ghi"},
                "items": [{"password": "hunter2"}]
            })
            .to_string(),
        );

        let displayed = display_body(&body);

        assert!(!displayed.contains("pw123456"));
        assert!(!displayed.contains("abc.def.ghi"));
        assert!(!displayed.contains("hunter2"));
        assert!(displayed.contains("alice@x.com"));
    }

    #[test]
    fn display_body_hides_non_json_bodies() {
        let displayed = display_body(&Bytes::from_static(b"password=hunter2"));

        assert_eq!(displayed, "<16 bytes of non-JSON data>");
    }

    #[test]
    fn display_body_of_empty_body_is_empty() {
        assert_eq!(display_body(&Bytes::new()), "");
    }

    #[test]
    fn truncate_respects_character_boundaries() {
        let body = "é".repeat(LOG_BODY_LENGTH_LIMIT + 1);

        let truncated = truncate(&body).unwrap();

        assert_eq!(truncated.chars().count(), LOG_BODY_LENGTH_LIMIT);
        assert_eq!(truncate("short"), None);
    }

    #[tokio::test]
    async fn middleware_passes_bodies_through_unchanged() {
        let server = get_echo_server();
        let body = json!({"password": "pw123456", "description": "x".repeat(100)});

        let response = server.post("/echo").json(&body).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), body);
    }

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() {
        let server = get_echo_server();

        let response = server
            .post("/echo")
            .bytes(Bytes::from(vec![b'x'; MAX_BODY_SIZE + 1]))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Request body is too large"})
        );
    }
}
