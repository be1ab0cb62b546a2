//! The session credential and the store that owns it. Exactly one credential
//! is authoritative at a time; it lives in either the durable or the
//! session-scoped backend, never both. Token material stays wrapped in
//! `SecretString` and must not be logged.

use super::storage::KeyValueStore;
use crate::client::ApiError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, sync::Arc};
use tracing::debug;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

const ACTIVE_STATUS: &str = "ACTIVE";

/// Which backend holds the credential, chosen by "remember me" at login.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageScope {
    Durable,
    SessionOnly,
}

impl StorageScope {
    #[must_use]
    pub fn from_remember_me(remember_me: bool) -> Self {
        if remember_me {
            Self::Durable
        } else {
            Self::SessionOnly
        }
    }
}

/// Profile fields captured when the credential was issued.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSnapshot {
    #[serde(deserialize_with = "null_as_empty")]
    pub user_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub status: String,
}

/// Reads a string field the server may send as `null`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserSnapshot {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

#[derive(Clone)]
pub struct Credential {
    token: SecretString,
    refresh_token: Option<SecretString>,
    user: Option<UserSnapshot>,
}

impl Credential {
    pub fn new(token: impl Into<String>, user: Option<UserSnapshot>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            refresh_token: None,
            user,
        }
    }

    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: Option<String>) -> Self {
        self.refresh_token = refresh_token
            .filter(|value| !value.is_empty())
            .map(SecretString::from);
        self
    }

    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<&SecretString> {
        self.refresh_token.as_ref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserSnapshot> {
        self.user.as_ref()
    }

    /// `Authorization` header value for this credential.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

/// Reads and writes the credential across the two backends.
#[derive(Clone)]
pub struct TokenStore {
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(durable: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { durable, session }
    }

    /// Returns the stored credential, durable backend first.
    #[must_use]
    pub fn get(&self) -> Option<Credential> {
        self.locate().map(|(credential, _)| credential)
    }

    /// Reports which backend currently holds the credential.
    #[must_use]
    pub fn scope(&self) -> Option<StorageScope> {
        self.locate().map(|(_, scope)| scope)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Stores `credential` in `scope` and clears the other backend.
    ///
    /// # Errors
    /// Returns `ApiError::Storage` if the target backend rejects the write; the
    /// target is cleared again so no partial credential remains.
    pub fn set(&self, credential: &Credential, scope: StorageScope) -> Result<(), ApiError> {
        let (target, other) = match scope {
            StorageScope::Durable => (&self.durable, &self.session),
            StorageScope::SessionOnly => (&self.session, &self.durable),
        };

        clear(other.as_ref());

        if let Err(err) = write(target.as_ref(), credential) {
            clear(target.as_ref());
            return Err(err);
        }

        debug!(?scope, "stored session credential");
        Ok(())
    }

    /// Swaps in refreshed tokens, keeping the user snapshot and the scope.
    ///
    /// # Errors
    /// Returns `ApiError::Storage` if the write fails.
    pub fn replace_token(
        &self,
        token: String,
        refresh_token: Option<String>,
    ) -> Result<Credential, ApiError> {
        let (current, scope) = self
            .locate()
            .map_or((None, StorageScope::SessionOnly), |(credential, scope)| {
                (Some(credential), scope)
            });

        let previous_refresh = current
            .as_ref()
            .and_then(Credential::refresh_token)
            .map(|secret| secret.expose_secret().to_string());
        let user = current.and_then(|credential| credential.user);

        let credential =
            Credential::new(token, user).with_refresh_token(refresh_token.or(previous_refresh));
        self.set(&credential, scope)?;
        Ok(credential)
    }

    /// Clears both backends. Never fails; calling it on an empty store is a no-op.
    pub fn remove(&self) {
        clear(self.durable.as_ref());
        clear(self.session.as_ref());
        debug!("cleared session credential");
    }

    fn locate(&self) -> Option<(Credential, StorageScope)> {
        [
            (&self.durable, StorageScope::Durable),
            (&self.session, StorageScope::SessionOnly),
        ]
        .into_iter()
        .find_map(|(backend, scope)| {
            backend
                .get(TOKEN_KEY)
                .map(|_| (read(backend.as_ref()), scope))
        })
        .and_then(|(credential, scope)| credential.map(|credential| (credential, scope)))
    }
}

fn read(backend: &dyn KeyValueStore) -> Option<Credential> {
    let token: String = parse_entry(backend, TOKEN_KEY)??;
    if token.is_empty() {
        return None;
    }

    let user = match parse_entry::<UserSnapshot>(backend, USER_KEY) {
        None => None,
        Some(Some(user)) => Some(user),
        Some(None) => return None,
    };

    let refresh_token = match parse_entry::<String>(backend, REFRESH_TOKEN_KEY) {
        None => None,
        Some(Some(refresh_token)) => Some(refresh_token),
        Some(None) => return None,
    };

    Some(Credential::new(token, user).with_refresh_token(refresh_token))
}

/// Outer `None`: key absent. Inner `None`: present but unparsable.
fn parse_entry<T: serde::de::DeserializeOwned>(
    backend: &dyn KeyValueStore,
    key: &str,
) -> Option<Option<T>> {
    let raw = backend.get(key)?;
    Some(
        serde_json::from_str(&raw)
            .inspect_err(|err| debug!(key, "discarding unparsable session entry: {err}"))
            .ok(),
    )
}

fn write(backend: &dyn KeyValueStore, credential: &Credential) -> Result<(), ApiError> {
    backend.set(TOKEN_KEY, &encode(credential.token.expose_secret())?)?;

    match credential.user() {
        Some(user) => backend.set(USER_KEY, &encode(user)?)?,
        None => backend.remove(USER_KEY),
    }

    match credential.refresh_token() {
        Some(refresh_token) => {
            backend.set(REFRESH_TOKEN_KEY, &encode(refresh_token.expose_secret())?)?;
        }
        None => backend.remove(REFRESH_TOKEN_KEY),
    }

    Ok(())
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value)
        .map_err(|err| ApiError::Storage(format!("Failed to encode session: {err}")))
}

fn clear(backend: &dyn KeyValueStore) {
    backend.remove(TOKEN_KEY);
    backend.remove(USER_KEY);
    backend.remove(REFRESH_TOKEN_KEY);
}
