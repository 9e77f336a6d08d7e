//! Dark-mode preference store
//!
//! Persists the flag under the `darkMode` storage key. When no stored value
//! exists, the caller-supplied system preference seeds the initial state;
//! the preference is only written back once the user changes it.

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::stores::cell::StateCell;
use std::sync::Arc;

const STORAGE_KEY: &str = "darkMode";

/// Persisted, subscribable dark-mode flag
pub struct ThemeStore {
    cell: StateCell<bool>,
    storage: Arc<dyn KeyValueStore>,
}

impl ThemeStore {
    /// Load the theme store
    ///
    /// # Arguments
    ///
    /// * `storage` - Key-value persistence backend
    /// * `system_prefers_dark` - Fallback when no stored value exists
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend fails
    pub fn load(storage: Arc<dyn KeyValueStore>, system_prefers_dark: bool) -> Result<Self> {
        let initial = match storage.get(STORAGE_KEY)? {
            Some(value) => value == "true",
            None => system_prefers_dark,
        };
        Ok(Self {
            cell: StateCell::new(initial),
            storage,
        })
    }

    /// Whether dark mode is currently enabled
    pub fn is_dark(&self) -> bool {
        self.cell.get()
    }

    /// Set the flag and persist it
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails; the in-memory value is still
    /// updated so the UI stays consistent within the session.
    pub fn set(&self, dark: bool) -> Result<()> {
        self.cell.set(dark);
        self.storage
            .set(STORAGE_KEY, if dark { "true" } else { "false" })
    }

    /// Flip the flag and persist it
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails
    pub fn toggle(&self) -> Result<bool> {
        let next = !self.cell.get();
        self.set(next)?;
        Ok(next)
    }

    /// Subscribe to theme changes
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<bool> {
        self.cell.subscribe()
    }
}
