//! Configuration management for Namunamu
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{NamuError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Namunamu
///
/// This structure holds all configuration needed for the service,
/// including HTTP server settings, the generation upstream, the email
/// upstream, and reminder scheduling behavior.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini text-generation upstream configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Transactional email upstream configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Recipe reminder scheduling configuration
    #[serde(default)]
    pub reminders: ReminderConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener on
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP listener on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Gemini text-generation upstream configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL of the generation API (overridable for tests and local mocks)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Model identifier to request
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API key; falls back to the `GEMINI_API_KEY` environment variable
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: default_gemini_api_base(),
            model: default_gemini_model(),
            api_key: None,
        }
    }
}

impl GeminiConfig {
    /// Resolve the API key from config or the `GEMINI_API_KEY` environment
    /// variable
    ///
    /// # Errors
    ///
    /// Returns `NamuError::Config` if neither source provides a key
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        std::env::var("GEMINI_API_KEY").map_err(|_| {
            NamuError::Config(
                "No Gemini API key configured (set gemini.api_key or GEMINI_API_KEY)".to_string(),
            )
            .into()
        })
    }
}

/// Transactional email upstream configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Base URL of the email API (overridable for tests and local mocks)
    #[serde(default = "default_email_api_base")]
    pub api_base: String,

    /// API key; falls back to the `RESEND_API_KEY` environment variable
    #[serde(default)]
    pub api_key: Option<String>,

    /// From address used on outgoing mail
    #[serde(default = "default_email_from")]
    pub from: String,
}

fn default_email_api_base() -> String {
    "https://api.resend.com".to_string()
}

fn default_email_from() -> String {
    "Namu Namu AI <onboarding@resend.dev>".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_base: default_email_api_base(),
            api_key: None,
            from: default_email_from(),
        }
    }
}

impl EmailConfig {
    /// Resolve the API key from config or the `RESEND_API_KEY` environment
    /// variable
    ///
    /// # Errors
    ///
    /// Returns `NamuError::Config` if neither source provides a key
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        std::env::var("RESEND_API_KEY").map_err(|_| {
            NamuError::Config(
                "No email API key configured (set email.api_key or RESEND_API_KEY)".to_string(),
            )
            .into()
        })
    }
}

/// Recipe reminder scheduling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Period of the recurring reminder check, in seconds
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

fn default_tick_seconds() -> u64 {
    60
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// If the file does not exist, defaults are used so the service can run
    /// from environment variables alone.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    ///
    /// # Examples
    ///
    /// ```
    /// use namunamu::config::Config;
    ///
    /// let config = Config::load("does-not-exist.yaml").unwrap();
    /// assert_eq!(config.server.port, 8080);
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `NamuError::Config` describing the first invalid field
    ///
    /// # Examples
    ///
    /// ```
    /// use namunamu::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(NamuError::Config("server.host must not be empty".to_string()).into());
        }
        if self.server.port == 0 {
            return Err(NamuError::Config("server.port must not be 0".to_string()).into());
        }
        if self.gemini.model.is_empty() {
            return Err(NamuError::Config("gemini.model must not be empty".to_string()).into());
        }
        if self.reminders.tick_seconds == 0 {
            return Err(
                NamuError::Config("reminders.tick_seconds must not be 0".to_string()).into(),
            );
        }
        Ok(())
    }
}
