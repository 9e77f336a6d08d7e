//! Transactional email delivery
//!
//! This module defines the Mailer trait the email endpoint depends on and
//! the Resend implementation that delivers through its HTTP API.

use crate::config::EmailConfig;
use crate::error::{NamuError, Result};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Email-sending collaborator
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one HTML email
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient address
    /// * `subject` - Message subject
    /// * `html_body` - HTML message body
    ///
    /// # Errors
    ///
    /// Returns `NamuError::Email` with the upstream reason on failure
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()>;
}

/// Mailer delivering through the Resend HTTP API
pub struct ResendMailer {
    client: Client,
    config: EmailConfig,
    api_key: String,
}

/// Request body for `POST /emails`
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl ResendMailer {
    /// Create a new Resend mailer
    ///
    /// # Arguments
    ///
    /// * `config` - Email configuration (api_base, key, from address)
    ///
    /// # Errors
    ///
    /// Returns error if no API key is configured or HTTP client
    /// initialization fails
    pub fn new(config: EmailConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("namunamu/0.2.0")
            .build()
            .map_err(|e| NamuError::Email(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        let url = format!("{}/emails", self.config.api_base);
        let body = SendEmailRequest {
            from: &self.config.from,
            to,
            subject,
            html: html_body,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NamuError::Email(format!("Failed to reach email API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Email API returned {}: {}", status, error_text);
            return Err(NamuError::Email(format!(
                "Email API returned {}: {}",
                status, error_text
            ))
            .into());
        }

        tracing::info!(to, subject, "Email sent");
        Ok(())
    }
}
