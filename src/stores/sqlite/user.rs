//! Implements a SQLite backed user store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error, PasswordHash, UserID,
    db::{CreateTable, MapRow},
    stores::UserStore,
    user::{NewUser, User},
};

/// Handles the creation, retrieval and update of User objects.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Errors
    ///
    /// Returns a [Error::DuplicateEmail] if the email is taken or [Error::SqlError] if an SQL related error occurred.
    fn create(&mut self, new_user: NewUser) -> Result<User, Error> {
        self.connection
            .lock()?
            .prepare(
                "INSERT INTO user (id, name, email, password, profile_image, created_at)
                 VALUES (?1, ?2, ?3, ?4, NULL, ?5)
                 RETURNING id, name, email, password, profile_image",
            )?
            .query_row(
                (
                    UserID::new_random(),
                    new_user.name,
                    new_user.email,
                    new_user.password_hash.to_string(),
                    OffsetDateTime::now_utc(),
                ),
                SQLiteUserStore::map_row,
            )
            .map_err(|e| e.into())
    }

    /// Get the user from the database that has the specified `email` address, or return [Error::NotFound] if such user does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [Error::NotFound] error if there is no user with the specified email or [Error::SqlError] there are SQL related errors.
    fn get_by_email(&self, email: &str) -> Result<User, Error> {
        self.connection
            .lock()?
            .prepare(
                "SELECT id, name, email, password, profile_image FROM user WHERE email = :email",
            )?
            .query_row(&[(":email", email)], SQLiteUserStore::map_row)
            .map_err(|e| e.into())
    }

    fn update_profile(
        &mut self,
        id: &UserID,
        name: &str,
        profile_image: Option<&str>,
    ) -> Result<User, Error> {
        let connection = self.connection.lock()?;

        let rows_affected = connection.execute(
            "UPDATE user SET name = ?1, profile_image = ?2 WHERE id = ?3",
            (name, profile_image, id),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingUser);
        }

        connection
            .prepare(
                "SELECT id, name, email, password, profile_image FROM user WHERE id = :id",
            )?
            .query_row(&[(":id", id)], SQLiteUserStore::map_row)
            .map_err(|e| e.into())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL,
                    profile_image TEXT,
                    created_at TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let name = row.get(offset + 1)?;
        let email = row.get(offset + 2)?;
        let raw_password_hash: String = row.get(offset + 3)?;
        let profile_image = row.get(offset + 4)?;

        let password_hash = PasswordHash::new_unchecked(&raw_password_hash);

        Ok(Self::ReturnType::new(
            id,
            name,
            email,
            password_hash,
            profile_image,
        ))
    }
}
