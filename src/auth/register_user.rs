//! The endpoint for registering a new user.

use axum::{Json, extract::State, http::StatusCode};
use email_address::EmailAddress;
use serde::Deserialize;

use crate::{
    Error, PasswordHash,
    app_state::UserState,
    auth::AuthResponse,
    request::{ApiJson, required},
    stores::UserStore,
    user::{NewUser, UserView},
};

/// The JSON body for registering a user.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    /// The user's display name.
    pub name: Option<String>,
    /// The email to log in with.
    pub email: Option<String>,
    /// The password to log in with.
    pub password: Option<String>,
}

/// A route handler for creating a new user.
///
/// Responds with a bearer token for the new user, so that the client does
/// not have to log in straight after registering.
pub async fn register_user<U>(
    State(mut state): State<UserState<U>>,
    ApiJson(form): ApiJson<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>), Error>
where
    U: UserStore + Send + Sync,
{
    let (Some(name), Some(email), Some(password)) = (
        required(form.name),
        required(form.email),
        form.password.filter(|password| !password.is_empty()),
    ) else {
        return Err(Error::Validation("All fields are required".to_owned()));
    };

    if !EmailAddress::is_valid(&email) {
        return Err(Error::Validation(format!(
            "\"{email}\" is not a valid email address"
        )));
    }

    match state.user_store.get_by_email(&email) {
        Ok(_) => return Err(Error::DuplicateEmail),
        Err(Error::NotFound) => {}
        Err(error) => return Err(error),
    }

    let password_hash = PasswordHash::hash_blocking(password, state.password_hash_cost).await?;

    // A concurrent registration with the same email still fails here with
    // `Error::DuplicateEmail` because of the unique constraint.
    let user = state.user_store.create(NewUser {
        name,
        email,
        password_hash,
    })?;

    let token = state.token_keys.issue(user.id(), user.email())?;

    tracing::info!("Registered new user {}", user.id());

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserView::from(&user),
        }),
    ))
}
