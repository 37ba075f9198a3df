use crate::{
    Error, TransactionId, UserID,
    stores::{TransactionQuery, TransactionStore},
    transaction::{NewTransaction, Transaction},
};

/// A transaction store whose every operation fails as if the database were broken.
#[derive(Debug, Clone)]
pub(crate) struct FailingTransactionStore;

impl TransactionStore for FailingTransactionStore {
    fn create(&mut self, _: &UserID, _: NewTransaction) -> Result<Transaction, Error> {
        Err(Error::SqlError(rusqlite::Error::InvalidQuery))
    }

    fn get_query(&self, _: &UserID, _: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn delete(&mut self, _: &TransactionId, _: &UserID) -> Result<(), Error> {
        Err(Error::SqlError(rusqlite::Error::InvalidQuery))
    }
}
