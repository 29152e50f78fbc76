//! Durable key/value storage behind the session store.
//!
//! DESIGN
//! ======
//! Writes take the full set of entries so the session's three keys land in
//! one storage operation. `FileStorage` keeps all keys in a single JSON map and
//! replaces it with a rename, so a crash mid-write leaves the previous map.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ClientError;

pub trait KeyValueStorage {
    /// Read one key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the backing store is unreadable.
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    /// Set every entry in one write.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the write fails; no entry changes.
    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), ClientError>;

    /// Remove every key in one write.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the write fails; no entry changes.
    fn remove_all(&self, keys: &[&str]) -> Result<(), ClientError>;
}

/// Process-local storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    /// Number of write operations performed so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn record_write(&self) {
        self.writes.set(self.writes.get().saturating_add(1));
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), ClientError> {
        let mut map = self.entries.borrow_mut();
        for (key, value) in entries {
            map.insert((*key).to_owned(), value.clone());
        }
        self.record_write();
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), ClientError> {
        let mut map = self.entries.borrow_mut();
        for key in keys {
            map.remove(*key);
        }
        self.record_write();
        Ok(())
    }
}

/// JSON-file storage that survives process restarts.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| storage_error(&self.path, &e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(storage_error(&self.path, &e)),
        }
    }

    fn persist(&self, map: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| storage_error(parent, &e))?;
        }
        let raw = serde_json::to_string_pretty(map).map_err(|e| storage_error(&self.path, &e))?;
        let tmp = self.path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));
        std::fs::write(&tmp, raw).map_err(|e| storage_error(&tmp, &e))?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "temp session file left behind");
            }
            return Err(storage_error(&self.path, &e));
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.load()?.remove(key))
    }

    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), ClientError> {
        let mut map = self.load()?;
        for (key, value) in entries {
            map.insert((*key).to_owned(), value.clone());
        }
        self.persist(&map)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), ClientError> {
        let mut map = self.load()?;
        for key in keys {
            map.remove(*key);
        }
        self.persist(&map)
    }
}

fn storage_error(path: &Path, error: &dyn std::fmt::Display) -> ClientError {
    ClientError::Storage(format!("{}: {error}", path.display()))
}
