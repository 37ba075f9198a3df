//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::{
    AppState, Error,
    auth::{log_in, register_user},
    endpoints,
    error::handle_panic,
    health::get_health,
    logging::logging_middleware,
    profile::update_profile_endpoint,
    stores::{TransactionStore, UserStore},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_endpoint,
        get_transactions_summary_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Routes that act on behalf of a user take the [Claims](crate::Claims)
/// extractor, so they reject requests without a valid bearer token.
pub fn build_router<U, T>(state: AppState<U, T>) -> Router
where
    U: UserStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let unprotected_routes = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::REGISTER, post(register_user::<U>))
        .route(endpoints::LOG_IN, post(log_in::<U>));

    let protected_routes = Router::new()
        .route(endpoints::PROFILE, put(update_profile_endpoint::<U>))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint::<T>).post(create_transaction_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTIONS_SUMMARY,
            get(get_transactions_summary_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            delete(delete_transaction_endpoint::<T>),
        );

    let router = protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_404_not_found)
        .with_state(state);

    add_middleware(router)
}

/// Wrap `router` with request logging, panic recovery and permissive CORS.
fn add_middleware(router: Router) -> Router {
    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
}

/// The fallback for unknown routes and unsupported methods.
async fn get_404_not_found() -> Error {
    Error::RouteNotFound
}

#[cfg(test)]
mod fallback_tests {
    use axum::{
        Router,
        http::{HeaderValue, StatusCode, header},
        routing::get,
    };
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{endpoints, test_utils::get_test_server};

    use super::add_middleware;

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/api/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!({"error": "Route not found"}));
    }

    #[tokio::test]
    async fn unsupported_method_is_not_found() {
        let server = get_test_server();

        let response = server.patch(endpoints::TRANSACTIONS).await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!({"error": "Route not found"}));
    }

    #[tokio::test]
    async fn panicking_handler_responds_with_internal_server_error() {
        async fn panic_handler() -> &'static str {
            panic!("a handler blew up");
        }

        let server =
            TestServer::new(add_middleware(Router::new().route("/panic", get(panic_handler))));

        let response = server.get("/panic").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Something went wrong!"})
        );
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let server = get_test_server();

        let response = server
            .get(endpoints::HEALTH)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://localhost:5173"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            HeaderValue::from_static("*")
        );
    }
}
