#![allow(dead_code)]

use anyhow::Result;
use groupdesk::{
    client::{ApiClient, ClientConfig, RecoveryPolicy},
    session::{self, Credential, StorageScope, TokenStore, UserSnapshot},
};
use std::net::TcpListener;
use tempfile::TempDir;
use wiremock::MockServer;

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Token store whose durable backend lives in a fresh temporary directory.
pub fn temp_store() -> Result<(TempDir, TokenStore)> {
    let dir = tempfile::tempdir()?;
    let tokens = session::file_backed(dir.path());
    Ok((dir, tokens))
}

pub fn client(server: &MockServer, tokens: TokenStore, policy: RecoveryPolicy) -> Result<ApiClient> {
    let config = ClientConfig::new(&server.uri())?.with_recovery(policy);
    Ok(ApiClient::new(config, tokens)?)
}

pub fn silent_refresh() -> RecoveryPolicy {
    RecoveryPolicy::SilentRefresh {
        refresh_path: "/refresh_token".to_string(),
    }
}

pub fn bob() -> UserSnapshot {
    UserSnapshot {
        user_name: "bob123".to_string(),
        email: "bob@example.com".to_string(),
        first_name: "Bob".to_string(),
        last_name: "Builder".to_string(),
        role: "USER".to_string(),
        status: "ACTIVE".to_string(),
    }
}

pub fn sign_in(tokens: &TokenStore, token: &str, refresh_token: Option<&str>) -> Result<()> {
    let credential = Credential::new(token, Some(bob()))
        .with_refresh_token(refresh_token.map(ToString::to_string));
    tokens.set(&credential, StorageScope::Durable)?;
    Ok(())
}
