//! Authentication: password hashing, bearer tokens, and the endpoints for
//! registering and logging in.

mod log_in;
mod middleware;
mod password;
mod register_user;
mod token;

use serde::{Deserialize, Serialize};

use crate::user::UserView;

pub use log_in::{LogInForm, log_in};
pub use password::PasswordHash;
pub use register_user::{RegisterForm, register_user};
pub use token::{Claims, DEFAULT_TOKEN_DURATION, TokenKeys};

/// The response body of a successful registration or log in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The bearer token to send with requests to protected routes.
    pub token: String,
    /// The user the token was issued to.
    pub user: UserView,
}
