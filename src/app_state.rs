//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{
    PasswordHash,
    auth::{DEFAULT_TOKEN_DURATION, TokenKeys},
    stores::{TransactionStore, UserStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<U, T>
where
    U: UserStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    /// The keys for signing and verifying bearer tokens.
    pub token_keys: TokenKeys,
    /// The bcrypt cost used when hashing new passwords.
    pub password_hash_cost: u32,
    /// The store for managing [users](crate::User).
    pub user_store: U,
    /// The store for managing user [transactions](crate::Transaction).
    pub transaction_store: T,
}

impl<U, T> AppState<U, T>
where
    U: UserStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    /// Create a new [AppState] that signs tokens with `jwt_secret`.
    pub fn new(jwt_secret: &str, user_store: U, transaction_store: T) -> Self {
        Self {
            token_keys: TokenKeys::new(jwt_secret, DEFAULT_TOKEN_DURATION),
            password_hash_cost: PasswordHash::DEFAULT_COST,
            user_store,
            transaction_store,
        }
    }

    /// Use `cost` for hashing new passwords instead of [PasswordHash::DEFAULT_COST].
    ///
    /// Meant for tests, where the default cost makes registering users slow.
    pub fn with_password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = cost;
        self
    }
}

impl<U, T> FromRef<AppState<U, T>> for TokenKeys
where
    U: UserStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    fn from_ref(state: &AppState<U, T>) -> Self {
        state.token_keys.clone()
    }
}

/// The state needed to register, log in and update users.
#[derive(Debug, Clone)]
pub struct UserState<U>
where
    U: UserStore + Send + Sync,
{
    /// The keys for signing bearer tokens.
    pub token_keys: TokenKeys,
    /// The bcrypt cost used when hashing new passwords.
    pub password_hash_cost: u32,
    /// The store for managing [users](crate::User).
    pub user_store: U,
}

impl<U, T> FromRef<AppState<U, T>> for UserState<U>
where
    U: UserStore + Clone + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    fn from_ref(state: &AppState<U, T>) -> Self {
        Self {
            token_keys: state.token_keys.clone(),
            password_hash_cost: state.password_hash_cost,
            user_store: state.user_store.clone(),
        }
    }
}

/// The state needed to create, list, summarize and delete transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing user [transactions](crate::Transaction).
    pub transaction_store: T,
}

impl<U, T> FromRef<AppState<U, T>> for TransactionState<T>
where
    U: UserStore + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<U, T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}
