//! Reactive state containers for client-facing session state
//!
//! Each store wraps a [`StateCell`] — a publish-subscribe container holding
//! a single current value — rather than ambient mutable globals. Stores
//! cover the authentication session, the dark-mode flag, and transient
//! toast notifications; the favorites store lives in [`crate::favorites`]
//! because it also drives reminder scheduling.

pub mod cell;
pub mod session;
pub mod theme;
pub mod toast;

pub use cell::StateCell;
pub use session::{AuthBackend, SessionState, SessionStore, UserIdentity};
pub use theme::ThemeStore;
pub use toast::{ToastConfig, ToastLevel, ToastStore};
