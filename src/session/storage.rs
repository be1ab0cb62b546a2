//! Key-value backends that hold session entries. The durable backend survives
//! process restarts (a JSON file); the session backend lives in memory and dies
//! with the process. Values are opaque strings, callers own the encoding.

use crate::client::ApiError;
use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use tracing::{debug, warn};

/// String key-value storage shared by the token store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns `ApiError::Storage` if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;

    /// Removes `key`; removing a missing key is a no-op.
    fn remove(&self, key: &str);
}

/// Process-local store, used for session-scoped credentials and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// File-backed store holding a flat JSON object of string entries.
///
/// Every operation re-reads the file so separate processes observe each
/// other's writes; last writer wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                warn!("Failed to read session file {}: {err}", self.path.display());
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            debug!("Ignoring unreadable session file {}: {err}", self.path.display());
            BTreeMap::new()
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), ApiError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(ApiError::Storage(format!(
                    "Failed to remove {}: {err}",
                    self.path.display()
                ))),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                ApiError::Storage(format!("Failed to create {}: {err}", parent.display()))
            })?;
        }

        let payload = serde_json::to_string_pretty(entries)
            .map_err(|err| ApiError::Storage(format!("Failed to encode session: {err}")))?;

        // Write next to the target, then rename so readers never see a torn file.
        let staging = self.path.with_extension("json.tmp");
        let written = write_private(&staging, payload.as_bytes())
            .and_then(|()| fs::rename(&staging, &self.path));
        if let Err(err) = written {
            let _ = fs::remove_file(&staging);
            return Err(ApiError::Storage(format!(
                "Failed to write {}: {err}",
                self.path.display()
            )));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load();
        if entries.remove(key).is_none() {
            return;
        }
        if let Err(err) = self.save(&entries) {
            warn!("Failed to clear session entry: {err}");
        }
    }
}

/// Creates (or truncates) `path` readable by the owner only, then writes `bytes`.
#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; a leftover staging file keeps its old bits.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
