//! Finance Tracker is a REST API for recording personal income and expenses.
//!
//! Users register with an email and password and receive a bearer token.
//! The token grants access to the user's own transactions, a summary of
//! their finances, and their profile.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod config;
mod database_id;
mod db;
pub mod endpoints;
mod error;
mod health;
mod logging;
mod profile;
mod request;
mod routing;
pub mod stores;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, TransactionState, UserState};
pub use auth::{
    AuthResponse, Claims, DEFAULT_TOKEN_DURATION, LogInForm, PasswordHash, RegisterForm, TokenKeys,
};
pub use config::{
    Config, ConfigError, DEVELOPMENT_JWT_SECRET, Environment, resolve_jwt_secret,
};
pub use database_id::{TransactionId, UserID};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use profile::ProfileForm;
pub use routing::build_router;
pub use transaction::{
    CategoryTotal, NewTransaction, Transaction, TransactionFilter, TransactionForm, TransactionKind,
    TransactionSummary, summarize,
};
pub use user::{NewUser, User, UserView};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
