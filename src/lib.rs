//! Namunamu - meal-planning and nutrition web service library
//!
//! This library provides the core functionality for the Namunamu service,
//! including the streaming generation relay, recipe reminder scheduling,
//! favorites persistence, and the HTTP surface.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `relay`: streaming passthrough from a generation upstream to an HTTP
//!   response body
//! - `reminders`: recurring recipe reminder scheduling and notification
//! - `favorites`: favorited recipes with local persistence and reminder
//!   wiring
//! - `providers`: text-generation upstream abstraction and the Gemini
//!   implementation
//! - `server`: axum router, shared state, and request handlers
//! - `stores`: reactive single-value state containers (session, theme,
//!   toast)
//! - `nutrition`: body-metric formulas backing the health analysis endpoint
//! - `prompts`: prompt builders for the generation endpoints
//! - `email`: transactional email upstream abstraction and the Resend
//!   implementation
//! - `config`, `error`, `cli`, `storage`: configuration, error types, CLI,
//!   and local key-value persistence
//!
//! # Example
//!
//! ```no_run
//! use namunamu::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     // Server startup would go here
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod email;
pub mod error;
pub mod favorites;
pub mod nutrition;
pub mod prompts;
pub mod providers;
pub mod relay;
pub mod reminders;
pub mod server;
pub mod storage;
pub mod stores;

// Re-export commonly used types
pub use config::Config;
pub use error::{NamuError, Result};
pub use favorites::{FavoritesStore, SavedRecipe};
pub use providers::{GenerationProvider, GenerationRequest, TextStream};
pub use relay::{relay, SessionState, StreamSession};
pub use reminders::{ReminderScheduler, ReminderTime};
