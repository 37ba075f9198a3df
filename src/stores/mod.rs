//! Contains traits and implementations for objects that store the domain models.

mod transaction;
mod user;

pub mod sqlite;

pub use transaction::{TransactionQuery, TransactionStore};
pub use user::UserStore;
