//! Defines the endpoint for listing the authenticated user's transactions.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    Error,
    app_state::TransactionState,
    auth::Claims,
    request::{ApiQuery, required},
    stores::{TransactionQuery, TransactionStore},
    transaction::Transaction,
};

/// The query parameters for filtering the transaction list.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilter {
    /// "income", "expense" or "all". Missing means "all".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Text that must appear in the description or category.
    pub search: Option<String>,
}

impl TryFrom<TransactionFilter> for TransactionQuery {
    type Error = Error;

    fn try_from(filter: TransactionFilter) -> Result<Self, Self::Error> {
        let kind = match required(filter.kind).as_deref() {
            None | Some("all") => None,
            Some(kind) => Some(kind.parse()?),
        };

        Ok(TransactionQuery {
            kind,
            search: required(filter.search),
        })
    }
}

/// A route handler that responds with the user's transactions, newest first.
pub async fn get_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
    claims: Claims,
    ApiQuery(filter): ApiQuery<TransactionFilter>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let query = TransactionQuery::try_from(filter)?;

    let transactions = state
        .transaction_store
        .get_query(&claims.user_id, query)?;

    Ok(Json(transactions))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, Error, UserID, build_router, endpoints,
        stores::TransactionQuery,
        test_utils::{
            FailingTransactionStore, TEST_JWT_SECRET, create_transaction, get_test_app_state,
            get_test_server, register_user, transaction_body,
        },
        transaction::{Transaction, TransactionKind},
    };

    use super::TransactionFilter;

    #[test]
    fn filter_defaults_to_everything() {
        assert_eq!(
            TransactionQuery::try_from(TransactionFilter::default()),
            Ok(TransactionQuery::default())
        );
        assert_eq!(
            TransactionQuery::try_from(TransactionFilter {
                kind: Some("all".to_owned()),
                search: Some(String::new()),
            }),
            Ok(TransactionQuery::default())
        );
    }

    #[test]
    fn filter_rejects_unknown_type() {
        assert_eq!(
            TransactionQuery::try_from(TransactionFilter {
                kind: Some("transfer".to_owned()),
                search: None,
            }),
            Err(Error::InvalidTransactionType)
        );
    }

    #[tokio::test]
    async fn lists_all_transactions_newest_first() {
        let server = get_test_server();
        let auth = register_user(&server, "Alice", "alice@x.com", "pw123456").await;
        let dates = [
            "2024-01-10",
            "2024-01-15",
            "2024-01-12",
            "2024-01-15",
            "2023-12-31",
        ];
        let mut created = Vec::new();
        for (i, date) in dates.iter().enumerate() {
            let body = transaction_body("expense", (i + 1) as f64, "Food", "Item", date);
            created.push(create_transaction(&server, &auth.token, &body).await);
        }

        let response = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&auth.token)
            .await;

        response.assert_status_ok();
        let got = response.json::<Vec<Transaction>>();
        let want = vec![
            created[3].clone(),
            created[1].clone(),
            created[2].clone(),
            created[0].clone(),
            created[4].clone(),
        ];
        assert_eq!(got, want);
    }

    #[tokio::test]
    async fn lists_only_own_transactions() {
        let server = get_test_server();
        let alice = register_user(&server, "Alice", "alice@x.com", "pw123456").await;
        let bob = register_user(&server, "Bob", "bob@x.com", "pw123456").await;
        create_transaction(
            &server,
            &bob.token,
            &transaction_body("income", 100.0, "Salary", "Pay", "2024-01-01"),
        )
        .await;

        let response = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&alice.token)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn filters_by_type_and_search() {
        let server = get_test_server();
        let auth = register_user(&server, "Alice", "alice@x.com", "pw123456").await;
        let salary = create_transaction(
            &server,
            &auth.token,
            &transaction_body("income", 3500.0, "Salary", "Monthly salary", "2024-01-15"),
        )
        .await;
        let groceries = create_transaction(
            &server,
            &auth.token,
            &transaction_body("expense", 85.5, "Food", "Grocery shopping", "2024-01-14"),
        )
        .await;

        let income = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("type", "income")
            .authorization_bearer(&auth.token)
            .await
            .json::<Vec<Transaction>>();
        assert_eq!(income, vec![salary]);
        assert!(income.iter().all(|t| t.kind == TransactionKind::Income));

        let searched = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("search", "food")
            .authorization_bearer(&auth.token)
            .await
            .json::<Vec<Transaction>>();
        assert_eq!(searched, vec![groceries]);
    }

    #[tokio::test]
    async fn unknown_type_filter_is_rejected() {
        let server = get_test_server();
        let auth = register_user(&server, "Alice", "alice@x.com", "pw123456").await;

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("type", "transfer")
            .authorization_bearer(&auth.token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Invalid transaction type"})
        );
    }

    #[tokio::test]
    async fn malformed_query_is_a_json_validation_error() {
        let server = get_test_server();
        let auth = register_user(&server, "Alice", "alice@x.com", "pw123456").await;

        let response = server
            .get(&format!("{}?type=income&type=expense", endpoints::TRANSACTIONS))
            .authorization_bearer(&auth.token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert!(body["error"].is_string(), "got {body}");
    }

    #[tokio::test]
    async fn listing_requires_valid_token() {
        let server = get_test_server();

        server
            .get(endpoints::TRANSACTIONS)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer("not-a-token")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn store_failure_is_a_generic_internal_error() {
        let state = get_test_app_state();
        let token = state
            .token_keys
            .issue(&UserID::new("u1"), "alice@x.com")
            .unwrap();
        let state = AppState::new(TEST_JWT_SECRET, state.user_store, FailingTransactionStore);
        let server = TestServer::new(build_router(state));

        let response = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Something went wrong!"})
        );
    }
}
