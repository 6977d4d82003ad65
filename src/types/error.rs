//! Unified Error Type System
//!
//! One error enum for the whole application. The search engine itself never
//! surfaces transient upstream failures: a failed expansion yields an empty
//! page list and the round proceeds with whatever succeeded. Errors here are
//! for the edges of the system: client construction, configuration, the
//! HTTP facade, and I/O.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WikiError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Operation timeout with context
    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    #[error("Server error: {0}")]
    Server(String),
}

impl WikiError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }
}

pub type Result<T> = std::result::Result<T, WikiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = WikiError::timeout("probe", Duration::from_millis(500));
        let text = err.to_string();
        assert!(text.contains("probe"));
        assert!(text.contains("500ms"));
    }

    #[test]
    fn test_config_display() {
        let err = WikiError::Config("batch_size must be 1..=50".to_string());
        assert_eq!(err.to_string(), "Config error: batch_size must be 1..=50");
    }

    #[test]
    fn test_unsupported_language_display() {
        let err = WikiError::UnsupportedLanguage("ja".to_string());
        assert_eq!(err.to_string(), "Unsupported language: ja");
    }

    #[test]
    fn test_decode_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: WikiError = parse_err.into();
        assert!(matches!(err, WikiError::Decode(_)));
        assert!(err.to_string().starts_with("JSON decode error"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: WikiError = io.into();
        assert!(matches!(err, WikiError::Io(_)));
    }
}
