//! Login form state. Submission moves the form from `Idle` to `Submitting`
//! and then to a terminal outcome; local validation failures never leave
//! `Idle`.

use super::client::AuthService;
use crate::{client::ApiError, session::Credential};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginFailure {
    /// The account exists but must be activated through the confirmation email.
    InactiveAccount { email: String },
    InvalidCredentials(String),
    /// Transport, server or storage failure; the user may retry as-is.
    Network(String),
}

#[derive(Clone, Debug, Default)]
pub enum LoginState {
    #[default]
    Idle,
    Submitting,
    Success(Credential),
    Failed(LoginFailure),
}

impl LoginState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failed(_))
    }

    /// Email to send a new confirmation to, when the account is inactive.
    #[must_use]
    pub fn offers_resend_confirmation(&self) -> Option<&str> {
        match self {
            Self::Failed(LoginFailure::InactiveAccount { email }) => Some(email),
            _ => None,
        }
    }

    #[must_use]
    pub fn can_retry(&self) -> bool {
        matches!(
            self,
            Self::Failed(LoginFailure::InvalidCredentials(_) | LoginFailure::Network(_))
        )
    }
}

/// Drives one login attempt and records every transition.
#[derive(Debug, Default)]
pub struct LoginFlow {
    state: LoginState,
    history: Vec<LoginState>,
}

impl LoginFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// States visited so far, oldest first, excluding the current one.
    #[must_use]
    pub fn history(&self) -> &[LoginState] {
        &self.history
    }

    /// Submits the form. Validation errors are returned and the flow stays `Idle`.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` for local failures; other failures are
    /// recorded as `LoginState::Failed` and the state is returned as `Ok`.
    pub async fn submit(
        &mut self,
        auth: &AuthService,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<&LoginState, ApiError> {
        super::validation::login(username, password)?;

        self.transition(LoginState::Submitting);
        let next = match auth.login(username, password, remember_me).await {
            Ok(credential) => LoginState::Success(credential),
            Err(err) => LoginState::Failed(failure_from(err)),
        };
        self.transition(next);
        Ok(&self.state)
    }

    fn transition(&mut self, next: LoginState) {
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous);
    }
}

fn failure_from(err: ApiError) -> LoginFailure {
    match err {
        ApiError::InactiveAccount { email } => LoginFailure::InactiveAccount { email },
        ApiError::InvalidCredentials(message) => LoginFailure::InvalidCredentials(message),
        other => LoginFailure::Network(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_account_is_terminal_without_retry() {
        let state = LoginState::Failed(LoginFailure::InactiveAccount {
            email: "bob@example.com".to_string(),
        });
        assert!(state.is_terminal());
        assert!(!state.can_retry());
        assert_eq!(state.offers_resend_confirmation(), Some("bob@example.com"));
    }

    #[test]
    fn credential_and_network_failures_allow_retry() {
        let invalid = LoginState::Failed(LoginFailure::InvalidCredentials("nope".to_string()));
        let network = LoginState::Failed(LoginFailure::Network("down".to_string()));
        assert!(invalid.can_retry());
        assert!(network.can_retry());
        assert_eq!(invalid.offers_resend_confirmation(), None);
        assert!(!LoginState::Idle.is_terminal());
        assert!(!LoginState::Submitting.can_retry());
    }

    #[test]
    fn failures_are_classified() {
        assert_eq!(
            failure_from(ApiError::InvalidCredentials("bad".to_string())),
            LoginFailure::InvalidCredentials("bad".to_string())
        );
        assert!(matches!(
            failure_from(ApiError::Timeout("slow".to_string())),
            LoginFailure::Network(_)
        ));
        assert!(matches!(
            failure_from(ApiError::Http {
                status: 500,
                message: "boom".to_string()
            }),
            LoginFailure::Network(message) if message.contains("boom")
        ));
    }

    #[tokio::test]
    async fn validation_failure_stays_idle() {
        let config = crate::client::ClientConfig::new("http://127.0.0.1:9")
            .expect("Failed to build config");
        let client = crate::client::ApiClient::new(config, crate::session::in_memory())
            .expect("Failed to build client");
        let auth = AuthService::new(client);

        let mut flow = LoginFlow::new();
        let result = flow.submit(&auth, "bob", "x", false).await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(matches!(flow.state(), LoginState::Idle));
        assert!(flow.history().is_empty());
    }
}
