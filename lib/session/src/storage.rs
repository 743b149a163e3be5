//! Durable key-value storage for the session pair.
//!
//! In the browser the store sits on `localStorage` (see the web crate).
//! Native hosts and tests use [`MemoryStorage`] or [`JsonFileStorage`].
//!
//! Writes are fire-and-forget: a backend that fails to persist logs the
//! failure and keeps its in-memory view, so a session change is never
//! refused because of the disk.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::StorageError;

/// A string-to-string store that survives application restarts.
pub trait KeyValueStorage {
    /// Returns the stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Deletes `key`. Removing a missing key is a no-op.
    fn remove(&mut self, key: &str);
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &mut T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }
}

/// Process-local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Storage kept in a JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Opens the store at `path`. A missing file starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or does not
    /// contain a JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> delib_core::Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    path,
                    reason: e.to_string(),
                }
                .into());
            }
        };
        Ok(Self { path, entries })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> delib_core::Result<(), StorageError> {
        let write_failed = |reason: String| StorageError::WriteFailed {
            path: self.path.clone(),
            reason,
        };
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| write_failed(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| write_failed(e.to_string()))?;
        Ok(())
    }

    fn persist_or_warn(&self) {
        if let Err(report) = self.persist() {
            warn!(path = %self.path.display(), error = %report, "failed to persist session storage");
        }
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist_or_warn();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist_or_warn();
        }
    }
}
