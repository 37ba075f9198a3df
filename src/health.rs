//! A route for checking that the server is up and responding.

use axum::Json;
use serde_json::{Value, json};

/// Respond with a static status message.
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Finance App API is running"
    }))
}
