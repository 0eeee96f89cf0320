//! Persistent key-value store for small client-side collections.
//!
//! Backends implement [`KeyValueStore`] over raw strings. Callers use the
//! typed [`PersistentStore`] wrapper, which never surfaces an error: a value
//! that is missing, unreadable or unparseable reads as the caller's default,
//! and a failed write is logged and dropped.

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Errors raised by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raw string storage keyed by name.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if never written.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed, failure-absorbing access to a [`KeyValueStore`].
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistentStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKvStore::new()))
    }

    /// Read `key`, falling back to `default` when absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read stored value");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Stored value is corrupt, using default");
                default
            }
        }
    }

    /// Serialize and persist `value` under `key`. Failures are logged only.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StoreError::from)
            .and_then(|raw| self.backend.set_raw(key, &raw));
        if let Err(e) = result {
            warn!(key = %key, error = %e, "Failed to persist value, change dropped");
        }
    }

    /// Delete `key`. Failures are logged only.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            warn!(key = %key, error = %e, "Failed to remove stored value");
        }
    }
}

impl std::fmt::Debug for PersistentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that fails every operation, like a full or locked database.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_raw(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Database("disk I/O error".to_string()))
        }

        fn set_raw(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Database("database or disk is full".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Database("disk I/O error".to_string()))
        }
    }

    #[test]
    fn test_get_returns_default_when_absent() {
        let store = PersistentStore::in_memory();
        let value: Vec<u32> = store.get("missing", vec![9]);
        assert_eq!(value, vec![9]);
    }

    #[test]
    fn test_set_then_get() {
        let store = PersistentStore::in_memory();
        store.set("ids", &vec![1u32, 2, 3]);
        let value: Vec<u32> = store.get("ids", Vec::new());
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_corrupt_value_reads_as_default() {
        let backend = Arc::new(MemoryKvStore::new());
        backend.set_raw("ids", "{not json").unwrap();
        let store = PersistentStore::new(backend);
        let value: Vec<u32> = store.get("ids", Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_backend_failures_are_absorbed() {
        let store = PersistentStore::new(Arc::new(BrokenStore));
        store.set("ids", &vec![1u32]);
        store.remove("ids");
        let value: Vec<u32> = store.get("ids", vec![42]);
        assert_eq!(value, vec![42]);
    }
}
