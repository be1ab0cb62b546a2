use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Avatar shown when the account never uploaded one.
pub const DEFAULT_AVATAR: &str = "Default/hearts.jpg";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(default = "default_avatar", deserialize_with = "avatar_or_default")]
    pub avatar_url: String,
    pub user_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub status: String,
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

fn avatar_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.unwrap_or_else(default_avatar))
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    /// Starts from the current profile so unchanged fields are sent back as-is.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            avatar_url: Some(profile.avatar_url.clone()),
        }
    }
}

#[derive(Clone, Default)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl fmt::Debug for ChangePasswordForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ChangePasswordForm")
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChangePasswordRequest<'a> {
    pub email: &'a str,
    pub old_password: &'a str,
    pub new_password: &'a str,
}
