use crate::{
    client::{ApiClient, ClientConfig, RecoveryPolicy},
    session::{self, TokenStore},
};
use anyhow::{Context, Result};
use std::{env, path::PathBuf, time::Duration};

const STATE_DIR_NAME: &str = "groupdesk";

/// Connection settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_base_url: String,
    pub state_dir: PathBuf,
    pub timeout: Duration,
    pub recovery: RecoveryPolicy,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_base_url: String) -> Self {
        Self {
            api_base_url,
            state_dir: default_state_dir(),
            timeout: crate::client::config::DEFAULT_TIMEOUT,
            recovery: RecoveryPolicy::default(),
        }
    }

    /// Reads the global flags from the top-level matches.
    ///
    /// # Errors
    /// Returns an error for an unknown recovery policy.
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Self> {
        let api_base_url = matches
            .get_one::<String>("api-url")
            .cloned()
            .context("missing required argument: --api-url")?;

        let mut globals = Self::new(api_base_url);

        if let Some(dir) = matches
            .get_one::<String>("state-dir")
            .map(|dir| dir.trim())
            .filter(|dir| !dir.is_empty())
        {
            globals.state_dir = PathBuf::from(dir);
        }

        if let Some(seconds) = matches.get_one::<u64>("timeout") {
            globals.timeout = Duration::from_secs(*seconds);
        }

        if let Some(policy) = matches.get_one::<String>("recovery-policy") {
            let refresh_path = matches.get_one::<String>("refresh-path").map(String::as_str);
            globals.recovery = RecoveryPolicy::parse(policy, refresh_path)?;
        }

        Ok(globals)
    }

    /// Token store backed by `<state_dir>/session.json`.
    #[must_use]
    pub fn tokens(&self) -> TokenStore {
        session::file_backed(&self.state_dir)
    }

    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn client(&self, tokens: TokenStore) -> Result<ApiClient> {
        let config = ClientConfig::new(&self.api_base_url)
            .context("invalid GROUPDESK_API_BASE_URL")?
            .with_timeout(self.timeout)
            .with_recovery(self.recovery.clone());
        Ok(ApiClient::new(config, tokens)?)
    }
}

/// `$XDG_STATE_HOME/groupdesk`, else `$HOME/.local/state/groupdesk`, else `./.groupdesk`.
fn default_state_dir() -> PathBuf {
    if let Some(dir) = env::var_os("XDG_STATE_HOME").filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir).join(STATE_DIR_NAME);
    }
    if let Some(home) = env::var_os("HOME").filter(|home| !home.is_empty()) {
        return PathBuf::from(home)
            .join(".local")
            .join("state")
            .join(STATE_DIR_NAME);
    }
    PathBuf::from(format!(".{STATE_DIR_NAME}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new("https://api.groupdesk.tld".to_string());
        assert_eq!(args.api_base_url, "https://api.groupdesk.tld");
        assert_eq!(args.timeout, Duration::from_secs(10));
        assert_eq!(args.recovery, RecoveryPolicy::HardInvalidate);
    }

    #[test]
    fn test_default_state_dir() {
        temp_env::with_vars(
            [
                ("XDG_STATE_HOME", Some("/var/state")),
                ("HOME", Some("/home/bob")),
            ],
            || {
                assert_eq!(default_state_dir(), PathBuf::from("/var/state/groupdesk"));
            },
        );
        temp_env::with_vars(
            [("XDG_STATE_HOME", None), ("HOME", Some("/home/bob"))],
            || {
                assert_eq!(
                    default_state_dir(),
                    PathBuf::from("/home/bob/.local/state/groupdesk")
                );
            },
        );
    }

    #[test]
    fn test_from_matches() -> Result<()> {
        let matches = crate::cli::commands::new().try_get_matches_from(vec![
            "groupdesk",
            "--api-url",
            "https://api.groupdesk.tld",
            "--state-dir",
            "/tmp/gd",
            "--timeout",
            "5",
            "--recovery-policy",
            "silent-refresh",
            "--refresh-path",
            "/auth/refresh",
            "whoami",
        ])?;

        let globals = GlobalArgs::from_matches(&matches)?;
        assert_eq!(globals.state_dir, PathBuf::from("/tmp/gd"));
        assert_eq!(globals.timeout, Duration::from_secs(5));
        assert_eq!(
            globals.recovery,
            RecoveryPolicy::SilentRefresh {
                refresh_path: "/auth/refresh".to_string()
            }
        );
        assert!(globals.client(crate::session::in_memory()).is_ok());
        Ok(())
    }
}
