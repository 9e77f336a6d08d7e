//! Authentication session state
//!
//! Tracks the current session as a subscribable value. The sign-in and
//! sign-out flows themselves (popup windows, token exchange) live behind
//! the [`AuthBackend`] collaborator trait and are not implemented here.

use crate::error::Result;
use crate::stores::cell::StateCell;
use async_trait::async_trait;
use std::sync::Arc;

/// Identity of a signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Stable unique identifier
    pub uid: String,
    /// Display name, if the backend provides one
    pub display_name: Option<String>,
    /// Email address, if the backend provides one
    pub email: Option<String>,
}

/// Current session state
///
/// `Unknown` is the initial state before the backend has reported anything;
/// `SignedOut` means the backend confirmed no session is present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Initial state: session status not yet determined
    #[default]
    Unknown,
    /// No session is present
    SignedOut,
    /// A session is present with the given identity
    SignedIn(UserIdentity),
}

/// Authentication collaborator
///
/// Implementations perform the actual sign-in and sign-out flows; the
/// session store only records the resulting state.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Run the sign-in flow and return the resulting identity
    ///
    /// # Errors
    ///
    /// Returns error if the flow fails or is cancelled
    async fn sign_in(&self) -> Result<UserIdentity>;

    /// Run the sign-out flow
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the sign-out
    async fn sign_out(&self) -> Result<()>;
}

/// Subscribable current-session store
pub struct SessionStore {
    cell: StateCell<SessionState>,
    backend: Arc<dyn AuthBackend>,
}

impl SessionStore {
    /// Create a store in the `Unknown` state
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            cell: StateCell::new(SessionState::Unknown),
            backend,
        }
    }

    /// Current session state snapshot
    pub fn session(&self) -> SessionState {
        self.cell.get()
    }

    /// Whether a session is currently present
    pub fn is_present(&self) -> bool {
        matches!(self.cell.get(), SessionState::SignedIn(_))
    }

    /// Subscribe to session state changes
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<SessionState> {
        self.cell.subscribe()
    }

    /// Run the backend sign-in flow and publish the resulting session
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged; the session state is left
    /// untouched on failure.
    pub async fn sign_in(&self) -> Result<()> {
        let identity = self.backend.sign_in().await?;
        self.cell.set(SessionState::SignedIn(identity));
        Ok(())
    }

    /// Run the backend sign-out flow and publish `SignedOut`
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged; the session state is left
    /// untouched on failure.
    pub async fn sign_out(&self) -> Result<()> {
        self.backend.sign_out().await?;
        self.cell.set(SessionState::SignedOut);
        Ok(())
    }
}
