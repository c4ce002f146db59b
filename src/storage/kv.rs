//! Key-Value Substrate
//!
//! `TigerStyle`: Smallest possible surface; set / get / remove / list keys.
//!
//! The fallback record store emulates tables on top of this seam. Two
//! implementations ship with the crate: [`MemoryKv`] (process-local) and
//! [`FileKv`] (one file per key, survives restarts). Host environments with
//! their own flat store implement [`KeyValueStore`] themselves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::error::{StorageError, StorageResult};
use crate::constants::KV_VALUE_BYTES_MAX;

// =============================================================================
// KeyValueStore Trait
// =============================================================================

/// A flat string-keyed namespace.
///
/// No compare-and-swap, no locking: concurrent writers to the same key race
/// and the last write wins. Acceptable for a single-user local store;
/// callers needing ordering serialize at the call site.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Set value at key, overwriting any existing value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Get the value at key, `None` if absent.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Delete a key. Returns true if it existed.
    async fn remove(&self, key: &str) -> StorageResult<bool>;

    /// List all keys in the namespace.
    async fn keys(&self) -> StorageResult<Vec<String>>;
}

/// Keys are `"{table}_{rowId}"`; nothing outside this set ever appears.
fn assert_valid_key(key: &str) {
    assert!(!key.is_empty(), "key must not be empty");
    assert!(
        key.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
        "key must be a table-prefixed identifier"
    );
}

// =============================================================================
// MemoryKv
// =============================================================================

/// In-memory key-value store.
///
/// Thread-safe via `RwLock`; contents live for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKv {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys (for tests).
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        assert_valid_key(key);
        assert!(value.len() <= KV_VALUE_BYTES_MAX, "value too large");

        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        assert_valid_key(key);

        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        assert_valid_key(key);

        let mut entries = self.entries.write().unwrap();
        Ok(entries.remove(key).is_some())
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = self.entries.read().unwrap();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        // Sort for determinism
        keys.sort();
        Ok(keys)
    }
}

// =============================================================================
// FileKv
// =============================================================================

/// File-backed key-value store: one file per key under a directory.
///
/// Durable across restarts. Writes are not fsynced; the host platform's page
/// cache policy applies.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    /// Returns a connection error if the directory cannot be created.
    pub async fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::connection(format!("cannot create kv dir: {e}")))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[async_trait]
impl KeyValueStore for FileKv {
    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        assert_valid_key(key);
        assert!(value.len() <= KV_VALUE_BYTES_MAX, "value too large");

        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(|e| StorageError::query(format!("kv write failed: {e}")))
    }

    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        assert_valid_key(key);

        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::query(format!("kv read failed: {e}"))),
        }
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        assert_valid_key(key);

        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::query(format!("kv delete failed: {e}"))),
        }
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| StorageError::query(format!("kv list failed: {e}")))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::query(format!("kv list failed: {e}")))?
        {
            if let Some(name) = entry.file_name().to_str() {
                keys.push(name.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

// =============================================================================
// Tests
// =============================================================================
