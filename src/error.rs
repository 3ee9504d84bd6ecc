// src/error.rs

//! Unified error handling for the station monitor.

use std::fmt;

use thiserror::Error;

/// Result type alias for station monitor operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Station URL is not a Dansk Retursystem station page
    #[error("Invalid station URL '{url}': {reason}")]
    InvalidStationUrl { url: String, reason: String },

    /// The same station URL was configured twice
    #[error("Station '{url}' is already configured")]
    DuplicateStation { url: String },

    /// No station registered under the given URL
    #[error("Unknown station '{url}'")]
    UnknownStation { url: String },

    /// Station page answered with a non-success status
    #[error("Fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Station page did not answer in time
    #[error("Fetching {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// Transport-level fetch failure
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid station URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::InvalidStationUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a duplicate station error.
    pub fn duplicate(url: impl Into<String>) -> Self {
        Self::DuplicateStation { url: url.into() }
    }

    /// Create a fetch error with the URL as context.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error is a recoverable fetch failure of a single cycle.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::HttpStatus { .. } | Self::Timeout { .. } | Self::Fetch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_recoverable() {
        assert!(AppError::fetch("https://x", "connection reset").is_transport());
        assert!(
            AppError::Timeout {
                url: "https://x".into(),
                secs: 30
            }
            .is_transport()
        );
        assert!(!AppError::duplicate("https://x").is_transport());
        assert!(!AppError::config("bad").is_transport());
    }

    #[test]
    fn invalid_and_duplicate_are_distinguishable() {
        let invalid = AppError::invalid_url("http://x", "scheme must be https");
        let duplicate = AppError::duplicate("https://x");
        assert!(matches!(invalid, AppError::InvalidStationUrl { .. }));
        assert!(matches!(duplicate, AppError::DuplicateStation { .. }));
        assert_eq!(
            invalid.to_string(),
            "Invalid station URL 'http://x': scheme must be https"
        );
    }
}
