//! Response guard: decides what happens after a decorated request comes back
//! with an authorization failure. The decision is pure; `ApiClient` carries it
//! out (clearing the store, refreshing, replaying).
//!
//! Flow Overview:
//! - Success, or any status other than the policy trigger: pass through.
//! - Requests sent without a credential are never recovered.
//! - Hard-invalidate: clear the store and surface `AuthorizationExpired`.
//! - Silent-refresh: refresh once, replay once with `retried` set; a replayed
//!   request is always passed through, so refresh is never re-entered.

use super::config::RecoveryPolicy;
use super::request::ApiRequest;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq)]
pub enum Verdict<'a> {
    Pass,
    Invalidate,
    Refresh { refresh_path: &'a str },
}

#[derive(Clone, Debug)]
pub struct ResponseGuard {
    policy: RecoveryPolicy,
}

impl ResponseGuard {
    #[must_use]
    pub fn new(policy: RecoveryPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn verdict(&self, request: &ApiRequest, status: StatusCode) -> Verdict<'_> {
        if status.as_u16() != self.policy.trigger_status() || !request.is_authorized() {
            return Verdict::Pass;
        }

        match &self.policy {
            RecoveryPolicy::HardInvalidate => Verdict::Invalidate,
            RecoveryPolicy::SilentRefresh { .. } if request.retried => Verdict::Pass,
            RecoveryPolicy::SilentRefresh { refresh_path } => Verdict::Refresh { refresh_path },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}
