//! Domain error types
//!
//! This module defines the error hierarchy for Veil. The client layer reports
//! [`DetectionError`] and [`RedactionError`]; the orchestrator folds both into
//! [`VeilError::AnonymizeFailed`] tagged with the failing [`Stage`].
//! None of these types expose third-party HTTP client types.

use std::fmt;
use thiserror::Error;

/// Pipeline stage that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Entity detection (stage 1)
    Detect,
    /// Redaction (stage 2)
    Redact,
}

impl Stage {
    /// Returns the stage name as used in logs and error payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Detect => "detect",
            Stage::Redact => "redact",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main Veil error type
#[derive(Debug, Error)]
pub enum VeilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller supplied unusable input (empty text, empty language)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One of the two anonymization stages failed
    #[error("Anonymization failed at {stage} stage{}: {cause}", status_suffix(.status))]
    AnonymizeFailed {
        stage: Stage,
        status: Option<u16>,
        cause: String,
    },

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl VeilError {
    /// Returns the failing stage, if this is a stage failure
    pub fn stage(&self) -> Option<Stage> {
        match self {
            VeilError::AnonymizeFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Short, caller-safe description of the failure
    ///
    /// This is what the HTTP surface places in the `details` field.
    pub fn details(&self) -> String {
        match self {
            VeilError::InvalidInput(msg) => msg.clone(),
            VeilError::AnonymizeFailed { cause, .. } => cause.clone(),
            other => other.to_string(),
        }
    }
}

/// Entity detector failure (stage 1)
///
/// Transport failures carry no status; non-success responses carry the
/// upstream status code. Malformed payloads are reported through `cause`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Detector request failed{}: {cause}", status_suffix(.status))]
pub struct DetectionError {
    /// Upstream HTTP status, if a response was received
    pub status: Option<u16>,
    /// Human readable cause
    pub cause: String,
}

impl DetectionError {
    /// Transport-level failure (connection refused, timeout, ...)
    pub fn transport(cause: impl Into<String>) -> Self {
        Self {
            status: None,
            cause: cause.into(),
        }
    }

    /// Upstream answered with a non-success status
    pub fn upstream(status: u16, cause: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            cause: cause.into(),
        }
    }

    /// Response body could not be decoded into the expected shape
    pub fn malformed(detail: impl fmt::Display) -> Self {
        Self::transport(format!("malformed response: {detail}"))
    }
}

/// Redactor failure (stage 2)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Redactor request failed{}: {cause}", status_suffix(.status))]
pub struct RedactionError {
    /// Upstream HTTP status, if a response was received
    pub status: Option<u16>,
    /// Human readable cause
    pub cause: String,
}

impl RedactionError {
    /// Transport-level failure (connection refused, timeout, ...)
    pub fn transport(cause: impl Into<String>) -> Self {
        Self {
            status: None,
            cause: cause.into(),
        }
    }

    /// Upstream answered with a non-success status
    pub fn upstream(status: u16, cause: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            cause: cause.into(),
        }
    }

    /// Response body could not be decoded into the expected shape
    pub fn malformed(detail: impl fmt::Display) -> Self {
        Self::transport(format!("malformed response: {detail}"))
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {code})"),
        None => String::new(),
    }
}

impl From<DetectionError> for VeilError {
    fn from(err: DetectionError) -> Self {
        VeilError::AnonymizeFailed {
            stage: Stage::Detect,
            status: err.status,
            cause: err.cause,
        }
    }
}

impl From<RedactionError> for VeilError {
    fn from(err: RedactionError) -> Self {
        VeilError::AnonymizeFailed {
            stage: Stage::Redact,
            status: err.status,
            cause: err.cause,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_veil_error_display() {
        let err = VeilError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_detection_error_maps_to_detect_stage() {
        let err: VeilError = DetectionError::upstream(503, "upstream unavailable").into();
        match err {
            VeilError::AnonymizeFailed {
                stage,
                status,
                cause,
            } => {
                assert_eq!(stage, Stage::Detect);
                assert_eq!(status, Some(503));
                assert_eq!(cause, "upstream unavailable");
            }
            other => panic!("Expected AnonymizeFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_redaction_error_maps_to_redact_stage() {
        let err: VeilError = RedactionError::transport("connection refused").into();
        assert_eq!(err.stage(), Some(Stage::Redact));
        assert_eq!(err.details(), "connection refused");
    }

    #[test]
    fn test_malformed_cause_prefix() {
        let err = DetectionError::malformed("expected an array");
        assert_eq!(err.status, None);
        assert!(err.cause.starts_with("malformed response"));
    }

    #[test]
    fn test_anonymize_failed_display_includes_status() {
        let err: VeilError = RedactionError::upstream(500, "boom").into();
        assert_eq!(
            err.to_string(),
            "Anonymization failed at redact stage (status 500): boom"
        );

        let err: VeilError = DetectionError::transport("timed out").into();
        assert_eq!(
            err.to_string(),
            "Anonymization failed at detect stage: timed out"
        );
    }

    #[test]
    fn test_invalid_input_details() {
        let err = VeilError::InvalidInput("text must not be empty".to_string());
        assert_eq!(err.details(), "text must not be empty");
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: VeilError = toml_err.into();
        assert!(matches!(err, VeilError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: VeilError = io_err.into();
        assert!(matches!(err, VeilError::Io(_)));
    }
}
