//! Key-value persistence boundary.
//!
//! The dashboard keeps a handful of whole-collection JSON blobs under fixed
//! keys. Nothing above this trait touches the underlying storage directly.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key of the authentication flag (`"true"` or absent).
pub const AUTH_KEY: &str = "campus_auth";
/// Key of the selected role (`"Student"` / `"Admin"` or absent).
pub const ROLE_KEY: &str = "campus_role";
/// Key of the issue collection (JSON array).
pub const ISSUES_KEY: &str = "campus_issues";
/// Key of the pro assistant transcript (JSON array).
pub const PRO_CHAT_KEY: &str = "pro_ai_history";

/// Errors raised by key-value store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}

/// An opaque string-to-string store.
///
/// Values are whole JSON documents; the store neither merges nor migrates them.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads and deserializes the JSON blob stored under `key`.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serializes `value` and stores it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
