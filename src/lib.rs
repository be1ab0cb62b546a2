//! # groupdesk
//!
//! Client for the Groupdesk REST API: sign-in and session handling, account
//! flows (registration, password reset, confirmation email), profile
//! management and group CRUD.
//!
//! ## Session lifecycle
//!
//! A successful login stores one credential in the [`session::TokenStore`],
//! either durably (remember me) or for the current process only. Every
//! request goes through [`client::ApiClient`], which attaches the bearer token
//! unless the endpoint is on the public allow-list, and hands authorization
//! failures to the response guard. Depending on the configured
//! [`client::RecoveryPolicy`] the guard either clears the credential at once
//! or refreshes it and replays the request a single time.
//!
//! Navigation guards in [`auth::guards`] decide, from the store alone, which
//! views a user may open.

pub mod auth;
pub mod cli;
pub mod client;
pub mod groups;
pub mod profile;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
