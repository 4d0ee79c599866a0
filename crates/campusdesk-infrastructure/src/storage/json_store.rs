//! File-backed key-value store.
//!
//! All keys live in one JSON object (`state.json`). Every write is a
//! read-modify-write of the whole file under an exclusive lock on a sibling
//! `state.lock`, which is created once and never deleted.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use campusdesk_core::store::{KeyValueStore, StoreError};
use fs2::FileExt;
use tracing::debug;

type StateMap = BTreeMap<String, String>;

/// A [`KeyValueStore`] persisted to a single JSON file.
///
/// Writers are serialized by an `fs2` lock and replace the file through a
/// synced temp file and a rename, so readers see either the old or the new
/// state. Reads take no lock.
///
/// A missing or empty file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StateMap, StoreError> {
        if !self.path.exists() {
            return Ok(StateMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StateMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, state: &StateMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Loads, mutates and saves the state while holding the lock.
    fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut StateMap),
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut state = self.load()?;
        f(&mut state);
        self.save(&state)
    }

    fn temp_path(&self) -> Result<PathBuf, StoreError> {
        let invalid = |msg: &str| {
            StoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, msg.to_string()))
        };
        let parent = self
            .path
            .parent()
            .ok_or_else(|| invalid("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| invalid("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!(key, bytes = value.len(), "Writing state key");
        self.update(|state| {
            state.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        debug!(key, "Removing state key");
        self.update(|state| {
            state.remove(key);
        })
    }
}

/// Exclusive lock on `<name>.lock`, released when the guard is dropped.
///
/// The lock file is never removed, so queued and newly arriving writers
/// always contend on the same inode.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, StoreError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| StoreError::Lock(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
