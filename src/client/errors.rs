use std::fmt;
use thiserror::Error;

/// A single field-level validation failure. These never leave the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Collection of field errors produced by one form check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// First message reported for `field`, if any.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Converts the collected errors into a result, `Ok` when nothing was reported.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` when at least one field failed.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                formatter.write_str("; ")?;
            }
            write!(formatter, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),
    #[error("Your account is not activated. Please check the inbox of {email}.")]
    InactiveAccount { email: String },
    #[error("Invalid username or password: {0}")]
    InvalidCredentials(String),
    #[error("Session expired ({status}): {message}")]
    AuthorizationExpired { status: u16, message: String },
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Response error: {0}")]
    Decode(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::AuthorizationExpired { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures where the server was never reached.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout("Request timed out. Please try again.".to_string())
        } else if err.is_decode() {
            Self::Decode(format!("Failed to decode response: {err}"))
        } else if err.is_builder() {
            Self::Config(format!("Failed to build request: {err}"))
        } else {
            Self::Network(format!("Unable to reach the server: {err}"))
        }
    }
}
