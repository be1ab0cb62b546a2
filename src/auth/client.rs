//! Auth API wrappers. Every call validates its input locally first, so a
//! rejected form never reaches the network, then goes through the shared
//! `ApiClient` pipeline.
//!
//! Passwords and tokens must never be logged; spans record the username or
//! the email at most.

use super::{
    types::{LoginRequest, LoginResponse, RegistrationForm, ResetPasswordForm},
    validation,
};
use crate::{
    client::{ApiClient, ApiError, ApiRequest},
    session::{Credential, StorageScope, TokenStore},
};
use tracing::{info, instrument, warn};

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const USERS_PATH: &str = "/users";
pub const RESET_PASSWORD_REQUEST_PATH: &str = "/users/resetPasswordRequest";
pub const RESEND_RESET_PASSWORD_PATH: &str = "/users/resendResetPassword";
pub const RESET_PASSWORD_PATH: &str = "/users/resetPassword";
pub const CONFIRM_REQUEST_PATH: &str = "/users/userRegistrationConfirmRequest";

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        self.client.tokens()
    }

    /// Signs in and stores the credential in the scope picked by `remember_me`.
    ///
    /// # Errors
    /// - `Validation` when the fields fail local checks (nothing is sent).
    /// - `InvalidCredentials` when the server rejects the username/password.
    /// - `InactiveAccount` when the account exists but is not activated; the
    ///   store is left untouched.
    /// - Transport, decode or storage errors otherwise.
    #[instrument(skip(self, password), fields(user = %username))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Credential, ApiError> {
        validation::login(username, password)?;

        let request = ApiRequest::post(LOGIN_PATH).json(&LoginRequest {
            username: username.trim(),
            password,
        })?;
        let response: LoginResponse = self
            .client
            .send_json(request)
            .await
            .map_err(rejected_login)?;

        if !response.user.is_active() {
            info!(status = %response.user.status, "login refused for inactive account");
            return Err(ApiError::InactiveAccount {
                email: response.user.email,
            });
        }

        if response.token.trim().is_empty() {
            return Err(ApiError::Decode(
                "Login response carried no token.".to_string(),
            ));
        }

        let credential = Credential::new(response.token, Some(response.user))
            .with_refresh_token(response.refresh_token);
        self.tokens()
            .set(&credential, StorageScope::from_remember_me(remember_me))?;

        info!(remember_me, "signed in");
        Ok(credential)
    }

    /// Tells the server to end the session, then clears the local credential.
    /// The server call is best effort: its failure is logged and ignored.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(err) = self.client.send_empty(ApiRequest::post(LOGOUT_PATH)).await {
            warn!("logout request failed: {err}");
        }
        self.tokens().remove();
        info!("signed out");
    }

    /// Creates an account. The confirmation field is checked here and never sent.
    ///
    /// # Errors
    /// `Validation` for local failures, `Http` with the server message otherwise.
    #[instrument(skip(self, form), fields(user = %form.user_name))]
    pub async fn register(&self, form: &RegistrationForm) -> Result<(), ApiError> {
        validation::registration(form)?;
        let request = ApiRequest::post(USERS_PATH).json(&form.to_request())?;
        self.client.send_empty(request).await?;
        info!("registration submitted");
        Ok(())
    }

    /// Asks the server to email a password reset link.
    ///
    /// # Errors
    /// `Validation` for a malformed address, `Http` with the server message otherwise.
    pub async fn request_reset_password(&self, email: &str) -> Result<String, ApiError> {
        self.email_request(RESET_PASSWORD_REQUEST_PATH, email).await
    }

    /// # Errors
    /// `Validation` for a malformed address, `Http` with the server message otherwise.
    pub async fn resend_reset_password(&self, email: &str) -> Result<String, ApiError> {
        self.email_request(RESEND_RESET_PASSWORD_PATH, email).await
    }

    /// # Errors
    /// `Validation` for a malformed address, `Http` with the server message otherwise.
    pub async fn resend_confirmation_email(&self, email: &str) -> Result<String, ApiError> {
        self.email_request(CONFIRM_REQUEST_PATH, email).await
    }

    /// Sets a new password with the token from the reset link.
    ///
    /// # Errors
    /// `Validation` when the form fails local checks, `Http` otherwise.
    #[instrument(skip(self, form))]
    pub async fn reset_password(&self, form: &ResetPasswordForm) -> Result<String, ApiError> {
        validation::reset_password(form)?;
        let request = ApiRequest::get(RESET_PASSWORD_PATH)
            .query("token", form.token.trim())
            .query("newPassword", &form.new_password);
        self.client.send_text(request).await
    }

    /// Credential currently held by the store, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<Credential> {
        self.tokens().get()
    }

    #[instrument(skip(self, email), fields(path = %path))]
    async fn email_request(&self, path: &str, email: &str) -> Result<String, ApiError> {
        validation::email(email)?;
        let request = ApiRequest::get(path).query("email", email.trim());
        self.client.send_text(request).await
    }
}

fn rejected_login(err: ApiError) -> ApiError {
    match err {
        ApiError::Http {
            status: 400 | 401 | 403 | 404,
            message,
        } => ApiError::InvalidCredentials(message),
        other => other,
    }
}
