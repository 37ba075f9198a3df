//! This file defines the salted, adaptive hash that is stored in place of a user's password.

use std::fmt::Display;

use bcrypt::{hash, verify};

use crate::Error;

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The work factor used for hashing passwords outside of tests.
    pub const DEFAULT_COST: u32 = 10;

    /// Create a hashed password from a raw password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to verify a password.
    /// Pass in [PasswordHash::DEFAULT_COST] to use the recommended cost.
    ///
    /// This blocks the current thread for as long as hashing takes, use
    /// [PasswordHash::hash_blocking] from async code.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password could not be hashed.
    pub fn new(raw_password: &str, cost: u32) -> Result<Self, Error> {
        match hash(raw_password, cost) {
            Ok(password_hash) => Ok(Self(password_hash)),
            Err(e) => Err(Error::HashingError(e.to_string())),
        }
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid password hash.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an invalid hash is provided it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    ///
    /// # Errors
    ///
    /// This function will return an error if the stored hash is malformed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        verify(raw_password, &self.0).map_err(|e| Error::HashingError(e.to_string()))
    }

    /// Hash `raw_password` on the blocking thread pool so that the async
    /// runtime is not stalled.
    pub async fn hash_blocking(raw_password: String, cost: u32) -> Result<Self, Error> {
        tokio::task::spawn_blocking(move || Self::new(&raw_password, cost))
            .await
            .map_err(|e| Error::HashingError(e.to_string()))?
    }

    /// Verify `raw_password` on the blocking thread pool so that the async
    /// runtime is not stalled.
    pub async fn verify_blocking(&self, raw_password: String) -> Result<bool, Error> {
        let password_hash = self.clone();

        tokio::task::spawn_blocking(move || password_hash.verify(&raw_password))
            .await
            .map_err(|e| Error::HashingError(e.to_string()))?
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
