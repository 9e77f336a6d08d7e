//! Toast notification store
//!
//! Shows one toast at a time and hides it automatically after a fixed
//! delay. Showing a new toast replaces the current one and cancels the
//! pending auto-hide so an older timer never hides a newer message.

use crate::stores::cell::StateCell;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::AbortHandle;

/// Default time a toast stays visible
const AUTO_HIDE: Duration = Duration::from_secs(3);

/// Severity of a toast message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Something needs attention
    Warning,
    /// Neutral information
    #[default]
    Info,
}

/// Current toast contents and visibility
#[derive(Debug, Clone, Default)]
pub struct ToastConfig {
    /// Message text
    pub message: String,
    /// Severity level
    pub level: ToastLevel,
    /// Whether the toast is currently shown
    pub visible: bool,
}

/// Subscribable toast store with auto-hide
pub struct ToastStore {
    cell: Arc<StateCell<ToastConfig>>,
    pending_hide: Mutex<Option<AbortHandle>>,
    auto_hide: Duration,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStore {
    /// Create a store with the default 3-second auto-hide
    pub fn new() -> Self {
        Self::with_auto_hide(AUTO_HIDE)
    }

    /// Create a store with a custom auto-hide delay
    pub fn with_auto_hide(auto_hide: Duration) -> Self {
        Self {
            cell: Arc::new(StateCell::new(ToastConfig::default())),
            pending_hide: Mutex::new(None),
            auto_hide,
        }
    }

    /// Current toast snapshot
    pub fn current(&self) -> ToastConfig {
        self.cell.get()
    }

    /// Subscribe to toast changes
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ToastConfig> {
        self.cell.subscribe()
    }

    /// Show a toast and schedule its auto-hide
    ///
    /// Cancels any previously scheduled hide so that a newer toast is never
    /// hidden by an older timer. Must be called within a tokio runtime.
    pub fn show(&self, message: impl Into<String>, level: ToastLevel) {
        self.cell.set(ToastConfig {
            message: message.into(),
            level,
            visible: true,
        });

        let cell = Arc::clone(&self.cell);
        let delay = self.auto_hide;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            cell.update(|toast| toast.visible = false);
        });

        if let Ok(mut pending) = self.pending_hide.lock() {
            if let Some(previous) = pending.replace(task.abort_handle()) {
                previous.abort();
            }
        }
    }

    /// Hide the current toast immediately
    pub fn hide(&self) {
        self.cell.update(|toast| toast.visible = false);
    }
}
