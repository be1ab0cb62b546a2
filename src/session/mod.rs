//! Session persistence: the credential model, the token store that owns it,
//! and the key-value backends it writes to.
//!
//! Layout per backend: `token` (JSON string), `user` (JSON object) and, when
//! the server issued one, `refreshToken` (JSON string).

pub mod storage;
pub mod token;

pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use token::{Credential, StorageScope, TokenStore, UserSnapshot};

use std::{path::Path, sync::Arc};

/// File name of the durable backend inside the state directory.
pub const SESSION_FILE: &str = "session.json";

/// Token store backed by `<state_dir>/session.json` and process memory.
pub fn file_backed(state_dir: &Path) -> TokenStore {
    TokenStore::new(
        Arc::new(FileStore::new(state_dir.join(SESSION_FILE))),
        Arc::new(MemoryStore::new()),
    )
}

/// Token store with both backends in memory.
#[must_use]
pub fn in_memory() -> TokenStore {
    TokenStore::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
}
