//! Key-value storage backends
//!
//! The expense collection lives under a single named entry in a string
//! key-value store. [`FileStore`] keeps one JSON file per key in the data
//! directory; [`MemoryStore`] keeps entries in memory and can enforce a byte
//! quota, which is how write failures are exercised in tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use super::file_io::{read_optional, write_atomic};
use crate::error::ExpenseError;

/// String key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, ExpenseError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(ExpenseError::Config(format!(
                "Invalid storage key '{}': use letters, digits, '-', '_' or '.'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        read_optional(self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        write_atomic(self.path_for(key)?, value.as_bytes())
    }
}

/// In-memory store with an optional total size quota (in bytes)
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys + values exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Seed an entry directly, bypassing the quota
    pub fn insert_raw(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        let mut entries = self.entries.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        let entries = self.entries.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        let mut entries = self.entries.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(ExpenseError::Storage(format!(
                    "Storage quota exceeded: {} bytes needed, {} available",
                    needed, quota
                )));
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.get("expense-tracker-data").unwrap(), None);
        store.set("expense-tracker-data", "[]").unwrap();
        assert_eq!(
            store.get("expense-tracker-data").unwrap().as_deref(),
            Some("[]")
        );
        assert!(temp_dir.path().join("expense-tracker-data.json").exists());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        assert!(store.set("../escape", "x").is_err());
        assert!(store.set("a/b", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_memory_store_quota() {
        let store = MemoryStore::with_quota(16);
        store.set("k", "small").unwrap();

        let err = store.set("k", "this value is far too large").unwrap_err();
        assert!(err.is_storage());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_memory_store_overwrite_does_not_double_count() {
        let store = MemoryStore::with_quota(10);
        store.set("k", "12345678").unwrap();
        store.set("k", "87654321").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("87654321"));
    }
}
