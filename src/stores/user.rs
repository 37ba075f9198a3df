//! Defines the user store trait.

use crate::{
    Error, UserID,
    user::{NewUser, User},
};

/// Handles the creation, lookup by email and profile updates of users.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns [Error::DuplicateEmail] if a user with the same email exists.
    fn create(&mut self, new_user: NewUser) -> Result<User, Error>;

    /// Get a user by their email.
    ///
    /// Returns [Error::NotFound] if no user with the given email exists.
    fn get_by_email(&self, email: &str) -> Result<User, Error>;

    /// Set the name and profile image of a user and return the updated user.
    ///
    /// Returns [Error::UpdateMissingUser] if no user with the given ID exists.
    fn update_profile(
        &mut self,
        id: &UserID,
        name: &str,
        profile_image: Option<&str>,
    ) -> Result<User, Error>;
}
