//! Defines the transaction store trait.

use crate::{
    Error, TransactionId, UserID,
    transaction::{NewTransaction, Transaction, TransactionKind},
};

/// Handles the creation, retrieval and deletion of transactions.
///
/// Every operation is scoped to a single user, a user can never see or
/// change another user's transactions through the store.
pub trait TransactionStore {
    /// Create a new transaction owned by `user_id`.
    fn create(
        &mut self,
        user_id: &UserID,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, Error>;

    /// Retrieve the transactions owned by `user_id` that match `query`.
    ///
    /// Transactions are ordered newest first by date, then by when they were
    /// created.
    fn get_query(&self, user_id: &UserID, query: TransactionQuery)
    -> Result<Vec<Transaction>, Error>;

    /// Delete the transaction with `id` if it is owned by `user_id`.
    ///
    /// Returns [Error::DeleteMissingTransaction] if there is no such
    /// transaction, or if it belongs to another user.
    fn delete(&mut self, id: &TransactionId, user_id: &UserID) -> Result<(), Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::get_query].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    /// Only include transactions of this kind. None includes both kinds.
    pub kind: Option<TransactionKind>,
    /// Only include transactions whose description or category contains this
    /// text, ignoring case.
    pub search: Option<String>,
}
