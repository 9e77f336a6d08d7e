//! Local key-value persistence for Namunamu
//!
//! Favorites and the theme flag persist across sessions through a small
//! string key-value contract. The embedded `sled` database backs the real
//! store; an in-memory implementation backs tests.

use crate::error::{NamuError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// String key-value persistence contract
///
/// Callers treat the store as synchronous: `get` returns the stored string
/// for a key (or `None`), `set` replaces it. Implementations must be safe
/// to share across threads.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns `NamuError::Storage` if the underlying store fails
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `NamuError::Storage` if the underlying store fails
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Persistent store backed by an embedded `sled` database
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open or create a store at the given directory
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the database directory
    ///
    /// # Errors
    ///
    /// Returns `NamuError::Storage` if the database cannot be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use namunamu::storage::SledStore;
    ///
    /// # fn main() -> namunamu::error::Result<()> {
    /// let store = SledStore::open("/tmp/namunamu.db")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path.as_ref())
            .map_err(|e| NamuError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key)
            .map_err(|e| NamuError::Storage(format!("Failed to read key {}: {}", key, e)))?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    NamuError::Storage(format!("Non-UTF-8 value under key {}: {}", key, e))
                })?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key, value.as_bytes())
            .map_err(|e| NamuError::Storage(format!("Failed to write key {}: {}", key, e)))?;
        self.db
            .flush()
            .map_err(|e| NamuError::Storage(format!("Failed to flush: {}", e)))?;
        Ok(())
    }
}

/// In-memory store used by tests
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| NamuError::Storage("Lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| NamuError::Storage("Lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
