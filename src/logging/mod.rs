//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - plain or JSON console output
//! - configurable log levels
//! - local file logging with rotation
//!
//! Submitted text and redacted output are never logged. Log records carry
//! lengths, counts, entity types, stages and endpoints only.
//!
//! # Example
//!
//! ```no_run
//! use veil::logging::init_logging;
//! use veil::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Service started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a pipeline stage
///
/// # Example
///
/// ```no_run
/// use veil::log_stage_start;
/// use veil::domain::Stage;
///
/// log_stage_start!(Stage::Detect, "http://localhost:5002/analyze");
/// ```
#[macro_export]
macro_rules! log_stage_start {
    ($stage:expr, $endpoint:expr) => {
        tracing::debug!(
            stage = %$stage,
            endpoint = %$endpoint,
            "Stage started"
        );
    };
}

/// Log the completion of a pipeline stage
///
/// # Example
///
/// ```no_run
/// use veil::log_stage_complete;
/// use veil::domain::Stage;
/// use std::time::Duration;
///
/// log_stage_complete!(Stage::Redact, Duration::from_millis(12), 3);
/// ```
#[macro_export]
macro_rules! log_stage_complete {
    ($stage:expr, $duration:expr, $count:expr) => {
        tracing::debug!(
            stage = %$stage,
            duration_ms = $duration.as_millis() as u64,
            count = $count,
            "Stage completed"
        );
    };
}

/// Log a pipeline stage failure
///
/// # Example
///
/// ```no_run
/// use veil::log_stage_failure;
/// use veil::domain::Stage;
///
/// log_stage_failure!(Stage::Detect, "connection failed");
/// log_stage_failure!(Stage::Redact, "redactor responded with status 500", Some(500u16));
/// ```
#[macro_export]
macro_rules! log_stage_failure {
    ($stage:expr, $cause:expr) => {
        tracing::warn!(
            stage = %$stage,
            cause = %$cause,
            "Stage failed"
        );
    };
    ($stage:expr, $cause:expr, $status:expr) => {
        tracing::warn!(
            stage = %$stage,
            cause = %$cause,
            status = ?$status,
            "Stage failed"
        );
    };
}
