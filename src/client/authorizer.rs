use super::request::{ApiRequest, normalize_path};
use crate::session::TokenStore;
use reqwest::header::HeaderValue;
use tracing::{trace, warn};

/// Attaches the stored bearer token to outgoing requests.
///
/// Requests to allow-listed paths are never decorated, even when a credential
/// exists, so a stale token is not replayed while signing in again.
#[derive(Clone, Debug)]
pub struct RequestAuthorizer {
    public_paths: Vec<String>,
}

impl RequestAuthorizer {
    pub fn new<I, S>(public_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            public_paths: public_paths
                .into_iter()
                .map(|path| normalize_path(path.as_ref()))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_public(&self, request: &ApiRequest) -> bool {
        let path = request.normalized_path();
        self.public_paths.iter().any(|public| *public == path)
    }

    /// Sets or clears `Authorization` according to the allow-list and the store.
    pub fn authorize(&self, request: &mut ApiRequest, tokens: &TokenStore) {
        request.clear_authorization();

        if self.is_public(request) {
            trace!(path = %request.path, "public endpoint, no credential attached");
            return;
        }

        let Some(credential) = tokens.get() else {
            return;
        };

        match HeaderValue::from_str(&credential.bearer()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.set_authorization(value);
            }
            Err(_) => warn!("stored token is not a valid header value; request sent without it"),
        }
    }
}
