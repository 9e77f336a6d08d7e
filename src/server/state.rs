//! Shared application state

use crate::config::Config;
use crate::email::{Mailer, ResendMailer};
use crate::error::Result;
use crate::providers::{GeminiProvider, GenerationProvider};
use std::sync::Arc;

/// State shared by every request handler
pub struct AppState {
    /// Text-generation upstream
    pub provider: Arc<dyn GenerationProvider>,
    /// Transactional email upstream
    pub mailer: Arc<dyn Mailer>,
    /// Loaded configuration
    pub config: Config,
}

impl AppState {
    /// Assemble state from explicit collaborators (tests inject stubs here)
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        mailer: Arc<dyn Mailer>,
        config: Config,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            mailer,
            config,
        })
    }

    /// Assemble state with the production collaborators
    ///
    /// # Errors
    ///
    /// Returns error if a collaborator cannot be constructed (missing API
    /// keys, client initialization failure)
    pub fn from_config(config: Config) -> Result<Arc<Self>> {
        let provider = Arc::new(GeminiProvider::new(config.gemini.clone())?);
        let mailer = Arc::new(ResendMailer::new(config.email.clone())?);
        Ok(Self::new(provider, mailer, config))
    }
}
