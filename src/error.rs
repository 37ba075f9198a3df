//! Defines the app level error type and its conversion into JSON error responses.
//!
//! Every failure is rendered with the same envelope: `{"error": "<message>"}`.

use std::{any::Any, sync::PoisonError};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The message sent to the client for any error it cannot do anything about.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body was missing a required field or had a malformed
    /// value. The message is shown to the client.
    #[error("{0}")]
    Validation(String),

    /// A transaction type other than `income` or `expense` was given.
    #[error("invalid transaction type")]
    InvalidTransactionType,

    /// A transaction amount that is not a number greater than zero was given.
    #[error("amount must be greater than 0")]
    InvalidAmount,

    /// The email used to register is already in use.
    #[error("the email is already in use")]
    DuplicateEmail,

    /// The email does not belong to a user or the password is wrong.
    ///
    /// Both cases share this variant so that clients cannot tell which
    /// emails are registered.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The request did not include a bearer token.
    #[error("no bearer token in the request")]
    MissingToken,

    /// The bearer token has a bad signature or is not a valid token.
    #[error("invalid token")]
    InvalidToken,

    /// The bearer token was valid once but is past its expiry time.
    #[error("the token has expired")]
    ExpiredToken,

    /// The JWT library could not sign a token.
    #[error("could not create token: {0}")]
    TokenCreation(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a transaction that does not exist or that belongs to
    /// another user. The two cases are deliberately indistinguishable.
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a user that does not exist.
    #[error("tried to update a user that is not in the database")]
    UpdateMissingUser,

    /// No route matched the request.
    #[error("no route matched the request")]
    RouteNotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(error: PoisonError<T>) -> Self {
        tracing::error!("the database lock is poisoned: {error}");
        Error::DatabaseLockError
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl Error {
    /// The HTTP status code that the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::InvalidTransactionType
            | Error::InvalidAmount
            | Error::DuplicateEmail
            | Error::InvalidCredentials => StatusCode::BAD_REQUEST,
            Error::MissingToken => StatusCode::UNAUTHORIZED,
            Error::InvalidToken | Error::ExpiredToken => StatusCode::FORBIDDEN,
            Error::NotFound
            | Error::DeleteMissingTransaction
            | Error::UpdateMissingUser
            | Error::RouteNotFound => StatusCode::NOT_FOUND,
            Error::TokenCreation(_)
            | Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message that is safe to show to the client.
    fn client_message(&self) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::InvalidTransactionType => "Invalid transaction type".to_owned(),
            Error::InvalidAmount => "Amount must be greater than 0".to_owned(),
            Error::DuplicateEmail => "User already exists".to_owned(),
            Error::InvalidCredentials => "Invalid credentials".to_owned(),
            Error::MissingToken => "Access token required".to_owned(),
            Error::InvalidToken => "Invalid token".to_owned(),
            Error::ExpiredToken => "Token has expired".to_owned(),
            Error::NotFound => "The requested resource could not be found".to_owned(),
            Error::DeleteMissingTransaction => "Transaction not found".to_owned(),
            Error::UpdateMissingUser => "User not found".to_owned(),
            Error::RouteNotFound => "Route not found".to_owned(),
            // Any errors that are not handled above are not intended to be shown to the client.
            Error::TokenCreation(_)
            | Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        error_response(status_code, &self.client_message())
    }
}

/// Build a response with the error envelope `{"error": message}`.
pub fn error_response(status_code: StatusCode, message: &str) -> Response {
    (status_code, Json(json!({ "error": message }))).into_response()
}

/// Turn a panic in a request handler into a generic internal server error.
///
/// The panic message is logged and never sent to the client.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else {
        "unknown panic payload".to_owned()
    };

    tracing::error!("A request handler panicked: {details}");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::to_bytes,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    use serde_json::{Value, json};

    use super::{Error, handle_panic};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn client_errors_use_the_error_envelope() {
        let response = Error::DuplicateEmail.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "User already exists"}));
    }

    #[tokio::test]
    async fn auth_errors_map_to_401_and_403() {
        assert_eq!(Error::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(Error::ExpiredToken.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let response =
            Error::SqlError(rusqlite::Error::InvalidColumnName("secret_column".to_owned()))
                .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Something went wrong!"})
        );
    }

    #[tokio::test]
    async fn panics_become_internal_server_errors() {
        let response = handle_panic(Box::new("oh no"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Something went wrong!"})
        );
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }
}
