//! Defines a user of the application and the public view of a user that is sent to clients.

use serde::{Deserialize, Serialize};
use crate::{PasswordHash, database_id::UserID};

/// A registered user.
///
/// The password hash is kept on this type only. It is never serialized, use
/// [UserView] for anything that leaves the server.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserID,
    name: String,
    email: String,
    password_hash: PasswordHash,
    profile_image: Option<String>,
}

impl User {
    /// Create a new user.
    pub fn new(
        id: UserID,
        name: String,
        email: String,
        password_hash: PasswordHash,
        profile_image: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            profile_image,
        }
    }

    /// The user's ID.
    pub fn id(&self) -> &UserID {
        &self.id
    }

    /// The user's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The user's password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// The user's profile image, if they have set one.
    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }
}

/// The data needed to create a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The user's display name.
    pub name: String,
    /// The user's email address, must be unique.
    pub email: String,
    /// The hash of the user's password.
    pub password_hash: PasswordHash,
}

/// The fields of a user that are safe to send to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// The user's ID.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The user's profile image, `null` if not set.
    pub profile_image: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}
