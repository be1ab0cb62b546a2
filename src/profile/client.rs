//! Profile endpoints for the signed-in user.

use super::types::{ChangePasswordForm, ChangePasswordRequest, Profile, UpdateProfileRequest};
use crate::{
    auth::validation,
    client::{ApiClient, ApiError, ApiRequest, FilePart},
};
use tracing::{info, instrument};

pub const PROFILE_PATH: &str = "/users/profile";
pub const CHANGE_PASSWORD_PATH: &str = "/users/changePassword";
pub const AVATAR_UPLOAD_PATH: &str = "/files/image";
/// Multipart field carrying the avatar image.
pub const AVATAR_FIELD: &str = "image";

#[derive(Clone)]
pub struct ProfileService {
    client: ApiClient,
}

impl ProfileService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// Returns transport errors or `Http` with the server message.
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.client.send_json(ApiRequest::get(PROFILE_PATH)).await
    }

    /// Saves the editable fields and returns the updated profile.
    ///
    /// # Errors
    /// Returns transport errors or `Http` with the server message.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &UpdateProfileRequest) -> Result<Profile, ApiError> {
        let request = ApiRequest::put(PROFILE_PATH).json(update)?;
        let profile = self.client.send_json(request).await?;
        info!("profile updated");
        Ok(profile)
    }

    /// Changes the password of the signed-in account. The email comes from the
    /// stored user snapshot, or from the profile when the snapshot lacks one.
    ///
    /// # Errors
    /// `Validation` when the form fails local checks, `Http` otherwise.
    #[instrument(skip(self, form))]
    pub async fn change_password(&self, form: &ChangePasswordForm) -> Result<String, ApiError> {
        validation::change_password(
            &form.old_password,
            &form.new_password,
            &form.confirm_new_password,
        )?;

        let stored_email = self
            .client
            .tokens()
            .get()
            .and_then(|credential| credential.user().map(|user| user.email.clone()))
            .filter(|email| !email.trim().is_empty());
        let email = match stored_email {
            Some(email) => email,
            None => self.profile().await?.email,
        };

        let request = ApiRequest::put(CHANGE_PASSWORD_PATH).json(&ChangePasswordRequest {
            email: &email,
            old_password: &form.old_password,
            new_password: &form.new_password,
        })?;
        let message = self.client.send_text(request).await?;
        info!("password changed");
        Ok(message)
    }

    /// Uploads a new avatar and returns the URL the server stored it under.
    ///
    /// # Errors
    /// Returns transport errors or `Http` with the server message.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_avatar(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let request = ApiRequest::post(AVATAR_UPLOAD_PATH).multipart(FilePart {
            field: AVATAR_FIELD.to_string(),
            file_name: file_name.to_string(),
            mime: mime.to_string(),
            bytes,
        });
        self.client.send_text(request).await
    }
}
