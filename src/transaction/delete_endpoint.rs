//! Defines the endpoint for deleting a single transaction.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{
    Error, TransactionId, app_state::TransactionState, auth::Claims, request::ApiPath,
    stores::TransactionStore,
};

/// A route handler for deleting one of the authenticated user's transactions.
///
/// Responds with 404 if the transaction does not exist or belongs to another user.
pub async fn delete_transaction_endpoint<T>(
    State(mut state): State<TransactionState<T>>,
    claims: Claims,
    ApiPath(transaction_id): ApiPath<TransactionId>,
) -> Result<Json<Value>, Error>
where
    T: TransactionStore + Send + Sync,
{
    state
        .transaction_store
        .delete(&transaction_id, &claims.user_id)?;

    tracing::debug!(
        "Deleted transaction {transaction_id} for user {}",
        claims.user_id
    );

    Ok(Json(
        json!({ "message": "Transaction deleted successfully" }),
    ))
}
