//! Request and response types for auth-related API calls. Login and
//! registration payloads carry passwords, so they must never be logged; their
//! `Debug` output is redacted.

use crate::session::{UserSnapshot, token::null_as_empty};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login reply: the access token plus the account snapshot.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub user: UserSnapshot,
}

/// Registration fields as typed by the user, confirmation included.
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub user_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Wire payload; the confirmation is a client-side check and is never sent.
    #[must_use]
    pub fn to_request(&self) -> RegistrationRequest<'_> {
        RegistrationRequest {
            user_name: &self.user_name,
            email: &self.email,
            first_name: &self.first_name,
            last_name: &self.last_name,
            password: &self.password,
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegistrationForm")
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest<'a> {
    pub user_name: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

/// New password chosen on the reset screen, with its confirmation.
#[derive(Clone, Default)]
pub struct ResetPasswordForm {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl fmt::Debug for ResetPasswordForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ResetPasswordForm")
            .finish_non_exhaustive()
    }
}
