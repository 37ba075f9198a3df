//! Totals over a user's transactions: the balance, income and expense sums,
//! and how expenses are split across categories.

use std::collections::HashMap;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::TransactionState,
    auth::Claims,
    stores::{TransactionQuery, TransactionStore},
    transaction::{Transaction, TransactionKind},
};

/// The aggregated view of a user's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// Total income minus total expenses.
    pub balance: f64,
    /// The sum of all income.
    pub total_income: f64,
    /// The sum of all expenses.
    pub total_expenses: f64,
    /// How many transactions the summary covers.
    pub transaction_count: usize,
    /// Expenses grouped by category, largest first.
    pub expenses_by_category: Vec<CategoryTotal>,
}

/// The expenses of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category label, compared exactly.
    pub category: String,
    /// The sum of the expenses in the category.
    pub amount: f64,
    /// The category's share of all expenses, from 0 to 100.
    pub percentage: f64,
}

/// Compute the summary for `transactions`.
pub fn summarize(transactions: &[Transaction]) -> TransactionSummary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut expenses_by_category: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => total_income += transaction.amount,
            TransactionKind::Expense => {
                total_expenses += transaction.amount;
                *expenses_by_category
                    .entry(transaction.category.as_str())
                    .or_default() += transaction.amount;
            }
        }
    }

    let mut expenses_by_category: Vec<CategoryTotal> = expenses_by_category
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_owned(),
            amount,
            percentage: if total_expenses > 0.0 {
                amount / total_expenses * 100.0
            } else {
                0.0
            },
        })
        .collect();

    expenses_by_category.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    TransactionSummary {
        balance: total_income - total_expenses,
        total_income,
        total_expenses,
        transaction_count: transactions.len(),
        expenses_by_category,
    }
}

/// A route handler that responds with the summary of the user's transactions.
pub async fn get_transactions_summary_endpoint<T>(
    State(state): State<TransactionState<T>>,
    claims: Claims,
) -> Result<Json<TransactionSummary>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let transactions = state
        .transaction_store
        .get_query(&claims.user_id, TransactionQuery::default())?;

    Ok(Json(summarize(&transactions)))
}
