//! Client configuration: API base URL, request timeout, the unauthenticated
//! allow-list, and the recovery policy applied to authorization failures.
//! Configuration values are public; do not store secrets here.

use super::errors::ApiError;
use std::time::Duration;
use url::Url;

/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Endpoint used by the silent-refresh policy.
pub const DEFAULT_REFRESH_PATH: &str = "/refresh_token";
/// Endpoints that never carry the bearer token: login and registration.
pub const DEFAULT_PUBLIC_PATHS: [&str; 2] = ["/login", "/users"];

/// What the response guard does when a decorated request is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Clear the stored credential on 401 and surface the error.
    #[default]
    HardInvalidate,
    /// On 403 refresh the token once and retry the original request.
    SilentRefresh { refresh_path: String },
}

impl RecoveryPolicy {
    /// Status code that triggers recovery under this policy.
    #[must_use]
    pub fn trigger_status(&self) -> u16 {
        match self {
            Self::HardInvalidate => 401,
            Self::SilentRefresh { .. } => 403,
        }
    }

    /// Parses `hard-invalidate` or `silent-refresh`.
    ///
    /// # Errors
    /// Returns `ApiError::Config` for unknown names.
    pub fn parse(name: &str, refresh_path: Option<&str>) -> Result<Self, ApiError> {
        match name.trim().to_lowercase().as_str() {
            "hard-invalidate" | "hard" => Ok(Self::HardInvalidate),
            "silent-refresh" | "refresh" => Ok(Self::SilentRefresh {
                refresh_path: refresh_path
                    .and_then(normalize_value)
                    .unwrap_or_else(|| DEFAULT_REFRESH_PATH.to_string()),
            }),
            other => Err(ApiError::Config(format!(
                "unknown recovery policy '{other}', expected hard-invalidate or silent-refresh"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub public_paths: Vec<String>,
    pub recovery: RecoveryPolicy,
}

impl ClientConfig {
    /// Builds a config for `base_url` with defaults for everything else.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base URL is blank or not http(s).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_value(base_url)
            .ok_or_else(|| ApiError::Config("API base URL is not configured.".to_string()))?;

        let parsed = Url::parse(&base_url)
            .map_err(|err| ApiError::Config(format!("invalid API base URL '{base_url}': {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "unsupported API base URL scheme '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: crate::APP_USER_AGENT.to_string(),
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(ToString::to_string).collect(),
            recovery: RecoveryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_recovery(mut self, recovery: RecoveryPolicy) -> Self {
        self.recovery = recovery;
        self
    }

    #[must_use]
    pub fn with_public_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Joins the configured base URL and `path`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
pub(crate) fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

pub(crate) fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
