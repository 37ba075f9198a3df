//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::OffsetDateTime;

use crate::{
    Error, TransactionId, UserID,
    db::{CreateTable, MapRow},
    stores::{TransactionQuery, TransactionStore},
    transaction::{NewTransaction, Transaction},
};

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction belongs to a [User](crate::User), the user
/// table must be set up in the database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `user_id` does not refer to a valid user,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(
        &mut self,
        user_id: &UserID,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock()?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (id, user_id, type, amount, category, description, date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 RETURNING id, user_id, type, amount, category, description, date, created_at",
            )?
            .query_row(
                (
                    TransactionId::new_random(),
                    user_id,
                    new_transaction.kind,
                    new_transaction.amount,
                    new_transaction.category,
                    new_transaction.description,
                    new_transaction.date,
                    OffsetDateTime::now_utc(),
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                // Code 787 occurs when a FOREIGN KEY constraint failed.
                // The token refers to a user that no longer exists.
                rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 787 => {
                    Error::NotFound
                }
                error => error.into(),
            })?;

        Ok(transaction)
    }

    /// Query for the transactions of a user in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_query(
        &self,
        user_id: &UserID,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![
            "SELECT id, user_id, type, amount, category, description, date, created_at FROM \"transaction\""
                .to_string(),
        ];
        let mut where_clause_parts = vec!["user_id = ?1".to_string()];
        let mut query_parameters = vec![Value::Text(user_id.to_string())];

        if let Some(kind) = query.kind {
            where_clause_parts.push(format!("type = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(kind.to_string()));
        }

        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        query_string_parts.push("ORDER BY date DESC, created_at DESC, rowid DESC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        let transactions = self
            .connection
            .lock()?
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        // SQLite's lower() only folds ASCII, so search is matched here instead.
        let transactions = match query.search {
            Some(search) => {
                let needle = search.to_lowercase();
                transactions
                    .into_iter()
                    .filter(|transaction| {
                        transaction.description.to_lowercase().contains(&needle)
                            || transaction.category.to_lowercase().contains(&needle)
                    })
                    .collect()
            }
            None => transactions,
        };

        Ok(transactions)
    }

    /// Delete a transaction owned by `user_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a transaction owned by `user_id`,
    /// - or [Error::SqlError] there is some other SQL error.
    fn delete(&mut self, id: &TransactionId, user_id: &UserID) -> Result<(), Error> {
        let rows_affected = self.connection.lock()?.execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (id, user_id),
        )?;

        match rows_affected {
            0 => Err(Error::DeleteMissingTransaction),
            _ => Ok(()),
        }
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                    amount REAL NOT NULL CHECK (amount > 0),
                    category TEXT NOT NULL,
                    description TEXT NOT NULL,
                    date TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        // Improve performance of listing a user's transactions newest first.
        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(offset)?,
            user_id: row.get(offset + 1)?,
            kind: row.get(offset + 2)?,
            amount: row.get(offset + 3)?,
            category: row.get(offset + 4)?,
            description: row.get(offset + 5)?,
            date: row.get(offset + 6)?,
            created_at: row.get(offset + 7)?,
        })
    }
}
