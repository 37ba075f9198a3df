//! Defines the endpoint for creating a new transaction.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::Value;
use time::Date;

use crate::{
    Error,
    app_state::TransactionState,
    auth::Claims,
    request::{ApiJson, required},
    stores::TransactionStore,
    transaction::{
        Transaction,
        core::{NewTransaction, date_format::DATE_FORMAT},
    },
};

/// The JSON body for creating a transaction.
///
/// Every field is optional here so that a missing field is reported as a
/// validation error instead of a deserialization error. Any other fields,
/// such as an owner ID, are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// A positive number, or a string holding one.
    pub amount: Option<Value>,
    /// A free-form label, e.g. "Food".
    pub category: Option<String>,
    /// A short text describing the transaction.
    pub description: Option<String>,
    /// The date in the format "YYYY-MM-DD".
    pub date: Option<String>,
}

impl TransactionForm {
    /// Check the form and convert it into a [NewTransaction].
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::Validation] if a field is missing or the date is malformed,
    /// - [Error::InvalidTransactionType] if the type is not "income" or "expense",
    /// - [Error::InvalidAmount] if the amount is not a number greater than zero.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let amount = self.amount.filter(|amount| match amount {
            Value::Null => false,
            Value::String(text) => !text.trim().is_empty(),
            _ => true,
        });

        let (Some(kind), Some(amount), Some(category), Some(description), Some(date)) = (
            required(self.kind),
            amount,
            required(self.category),
            required(self.description),
            required(self.date),
        ) else {
            return Err(Error::Validation("All fields are required".to_owned()));
        };

        let kind = kind.parse()?;
        let amount = parse_amount(&amount)?;
        let date = Date::parse(date.trim(), DATE_FORMAT).map_err(|_| {
            Error::Validation(format!(
                "Invalid date \"{date}\", expected the format YYYY-MM-DD"
            ))
        })?;

        Ok(NewTransaction {
            kind,
            amount,
            category,
            description,
            date,
        })
    }
}

fn parse_amount(amount: &Value) -> Result<f64, Error> {
    let amount = match amount {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match amount {
        Some(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount),
    }
}

/// A route handler for creating a new transaction owned by the authenticated user.
///
/// Responds with the stored transaction, including its new ID.
pub async fn create_transaction_endpoint<T>(
    State(mut state): State<TransactionState<T>>,
    claims: Claims,
    ApiJson(form): ApiJson<TransactionForm>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    T: TransactionStore + Send + Sync,
{
    let new_transaction = form.validate()?;

    let transaction = state
        .transaction_store
        .create(&claims.user_id, new_transaction)?;

    tracing::debug!(
        "Created transaction {} for user {}",
        transaction.id,
        claims.user_id
    );

    Ok((StatusCode::CREATED, Json(transaction)))
}
