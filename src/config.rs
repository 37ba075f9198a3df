//! Command line and environment configuration for the server.

use clap::{Parser, ValueEnum};

/// The secret used to sign tokens when the server runs in development and
/// no secret has been configured.
pub const DEVELOPMENT_JWT_SECRET: &str = "finance-tracker-development-secret";

/// The REST API server for the finance tracker.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH", default_value = "finance_app.db")]
    pub db_path: String,

    /// The address to serve the API from.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// The secret used to sign and verify access tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Whether the server is running in development or production.
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// File path to write debug logs to, in addition to stdout.
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<String>,
}

/// The environment the server is deployed to.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development, missing configuration falls back to defaults.
    Development,
    /// A deployed server, secrets must be configured.
    Production,
}

/// The errors that may occur while resolving the server configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// No token signing secret was configured for a production server.
    #[error("JWT_SECRET must be set when running in production")]
    MissingJwtSecret,
}

/// Get the secret for signing tokens.
///
/// A configured, non-empty `secret` is always used. Otherwise production
/// servers fail with [ConfigError::MissingJwtSecret] and development servers
/// fall back to [DEVELOPMENT_JWT_SECRET].
pub fn resolve_jwt_secret(
    secret: Option<&str>,
    environment: Environment,
) -> Result<String, ConfigError> {
    match (secret.filter(|secret| !secret.is_empty()), environment) {
        (Some(secret), _) => Ok(secret.to_owned()),
        (None, Environment::Production) => Err(ConfigError::MissingJwtSecret),
        (None, Environment::Development) => {
            tracing::warn!(
                "JWT_SECRET is not set, falling back to the development secret. \
                Do not use this configuration in production."
            );
            Ok(DEVELOPMENT_JWT_SECRET.to_owned())
        }
    }
}
