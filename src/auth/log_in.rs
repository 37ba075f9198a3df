//! The endpoint for logging in with an email and password.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    Error,
    app_state::UserState,
    auth::AuthResponse,
    request::{ApiJson, required},
    stores::UserStore,
    user::UserView,
};

/// The JSON body for logging in.
#[derive(Debug, Default, Deserialize)]
pub struct LogInForm {
    /// The email the user registered with.
    pub email: Option<String>,
    /// The user's password.
    pub password: Option<String>,
}

/// A route handler that exchanges an email and password for a bearer token.
///
/// An unknown email and a wrong password both respond with
/// [Error::InvalidCredentials].
pub async fn log_in<U>(
    State(state): State<UserState<U>>,
    ApiJson(form): ApiJson<LogInForm>,
) -> Result<Json<AuthResponse>, Error>
where
    U: UserStore + Send + Sync,
{
    let (Some(email), Some(password)) = (
        required(form.email),
        form.password.filter(|password| !password.is_empty()),
    ) else {
        return Err(Error::Validation(
            "Email and password are required".to_owned(),
        ));
    };

    let user = match state.user_store.get_by_email(&email) {
        Ok(user) => user,
        Err(Error::NotFound) => return Err(Error::InvalidCredentials),
        Err(error) => return Err(error),
    };

    if !user.password_hash().verify_blocking(password).await? {
        return Err(Error::InvalidCredentials);
    }

    let token = state.token_keys.issue(user.id(), user.email())?;

    tracing::debug!("User {} logged in", user.id());

    Ok(Json(AuthResponse {
        token,
        user: UserView::from(&user),
    }))
}
