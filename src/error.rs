//! Error types for Namunamu
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Namunamu operations
///
/// This enum encompasses all possible errors that can occur during
/// request validation, upstream generation calls, email delivery,
/// reminder scheduling, and local persistence.
#[derive(Error, Debug)]
pub enum NamuError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or missing request input, rejected before any upstream call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Text-generation upstream errors (API calls, malformed responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Transactional email delivery errors
    #[error("Email error: {0}")]
    Email(String),

    /// Local key-value persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The notification facility is not available on this device
    #[error("Notifications are not available on this device")]
    NotificationsUnavailable,

    /// Notification permission was refused by the user
    #[error("Notification permission denied")]
    PermissionDenied,

    /// A reminder time string did not parse as `HH:MM`
    #[error("Invalid reminder time: {0}")]
    InvalidReminderTime(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Namunamu operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = NamuError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_validation_error_display() {
        let error = NamuError::Validation("missing ingredients".to_string());
        assert_eq!(error.to_string(), "Validation error: missing ingredients");
    }

    #[test]
    fn test_provider_error_display() {
        let error = NamuError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_email_error_display() {
        let error = NamuError::Email("rejected recipient".to_string());
        assert_eq!(error.to_string(), "Email error: rejected recipient");
    }

    #[test]
    fn test_permission_denied_display() {
        let error = NamuError::PermissionDenied;
        assert_eq!(error.to_string(), "Notification permission denied");
    }

    #[test]
    fn test_notifications_unavailable_display() {
        let error = NamuError::NotificationsUnavailable;
        assert_eq!(
            error.to_string(),
            "Notifications are not available on this device"
        );
    }

    #[test]
    fn test_invalid_reminder_time_display() {
        let error = NamuError::InvalidReminderTime("25:99".to_string());
        assert_eq!(error.to_string(), "Invalid reminder time: 25:99");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: NamuError = io_error.into();
        assert!(matches!(error, NamuError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: NamuError = json_error.into();
        assert!(matches!(error, NamuError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: NamuError = yaml_error.into();
        assert!(matches!(error, NamuError::Yaml(_)));
    }

    #[test]
    fn test_storage_error_display() {
        let error = NamuError::Storage("database connection failed".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: database connection failed"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NamuError>();
    }
}
