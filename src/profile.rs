//! The endpoint for updating the authenticated user's profile.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    Error,
    app_state::UserState,
    auth::Claims,
    request::{ApiJson, required},
    stores::UserStore,
    user::UserView,
};

/// The JSON body for updating a profile.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    /// The new display name.
    pub name: Option<String>,
    /// The new profile image. Missing, `null` or empty clears the image.
    pub profile_image: Option<String>,
}

/// A route handler for setting the name and profile image of the authenticated user.
///
/// Responds with the updated user.
pub async fn update_profile_endpoint<U>(
    State(mut state): State<UserState<U>>,
    claims: Claims,
    ApiJson(form): ApiJson<ProfileForm>,
) -> Result<Json<UserView>, Error>
where
    U: UserStore + Send + Sync,
{
    let Some(name) = required(form.name) else {
        return Err(Error::Validation("Name is required".to_owned()));
    };

    let profile_image = form.profile_image.filter(|image| !image.is_empty());

    let user = state
        .user_store
        .update_profile(&claims.user_id, &name, profile_image.as_deref())?;

    Ok(Json(UserView::from(&user)))
}
