//! Transactions: the stored income and expense records, and the endpoints
//! for creating, listing, summarizing and deleting them.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod summary;

pub use core::{NewTransaction, Transaction, TransactionKind};
pub use create_endpoint::{TransactionForm, create_transaction_endpoint};
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::{TransactionFilter, get_transactions_endpoint};
pub use summary::{CategoryTotal, TransactionSummary, get_transactions_summary_endpoint, summarize};
