use axum::http::StatusCode;
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{
    auth::AuthResponse,
    build_router, endpoints,
    stores::sqlite::{SQLAppState, create_app_state},
    transaction::Transaction,
};

pub(crate) const TEST_JWT_SECRET: &str = "averysecretsecret";

/// The lowest cost bcrypt accepts, keeps tests that register users fast.
const TEST_PASSWORD_HASH_COST: u32 = 4;

pub(crate) fn get_test_app_state() -> SQLAppState {
    let connection =
        Connection::open_in_memory().expect("Could not open database in memory.");

    create_app_state(connection, TEST_JWT_SECRET)
        .expect("Could not create app state.")
        .with_password_hash_cost(TEST_PASSWORD_HASH_COST)
}

pub(crate) fn get_test_server() -> TestServer {
    TestServer::new(build_router(get_test_app_state()))
}

pub(crate) async fn register_user(
    server: &TestServer,
    name: &str,
    email: &str,
    password: &str,
) -> AuthResponse {
    let response = server
        .post(endpoints::REGISTER)
        .json(&json!({ "name": name, "email": email, "password": password }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<AuthResponse>()
}

pub(crate) fn transaction_body(
    kind: &str,
    amount: f64,
    category: &str,
    description: &str,
    date: &str,
) -> Value {
    json!({
        "type": kind,
        "amount": amount,
        "category": category,
        "description": description,
        "date": date,
    })
}

pub(crate) async fn create_transaction(
    server: &TestServer,
    token: &str,
    body: &Value,
) -> Transaction {
    let response = server
        .post(endpoints::TRANSACTIONS)
        .authorization_bearer(token)
        .json(body)
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Transaction>()
}
