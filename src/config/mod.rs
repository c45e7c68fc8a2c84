//! Configuration management for Veil.
//!
//! # Overview
//!
//! Veil uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VEIL_*` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! The loaded [`VeilConfig`] is immutable for the lifetime of the process and
//! is handed to the orchestrator and server by reference.
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [server]
//! bind_address = "0.0.0.0:3000"
//! request_timeout_seconds = 30
//!
//! [detector]
//! url = "http://presidio-analyzer:3000/analyze"
//! timeout_seconds = 10
//!
//! [redactor]
//! url = "http://presidio-anonymizer:3000/anonymize"
//! api_key = "${VEIL_REDACTOR_TOKEN}"
//!
//! [policy.DEFAULT]
//! type = "replace"
//! new_value = "ANONYMIZED"
//!
//! [policy.PERSON]
//! type = "mask"
//! masking_char = "*"
//! chars_to_mask = 3
//! from_end = true
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use veil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("veil.toml")?;
//! println!("Detector: {}", config.detector_url());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_or_default, parse_config};
pub use schema::{
    ApplicationConfig, Environment, LoggingConfig, ServerConfig, Service, ServiceConfig,
    VeilConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
