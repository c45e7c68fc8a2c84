//! Configuration schema types
//!
//! This module defines the configuration structure for Veil. Every section
//! has defaults, so an empty file is a valid development configuration.

use crate::anonymization::policy::{MaskingOperation, PolicyTable};
use crate::config::SecretString;
use crate::domain::Result as VeilResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment (services on localhost)
    #[default]
    Development,
    /// Production environment (services addressed by container name)
    Production,
}

/// Upstream service a client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Entity detector
    Detector,
    /// Redactor
    Redactor,
}

impl Environment {
    /// Default endpoint of `service` for this environment
    pub fn default_url(&self, service: Service) -> &'static str {
        match (self, service) {
            (Environment::Development, Service::Detector) => "http://localhost:5002/analyze",
            (Environment::Development, Service::Redactor) => "http://localhost:5001/anonymize",
            (Environment::Production, Service::Detector) => "http://presidio-analyzer:3000/analyze",
            (Environment::Production, Service::Redactor) => {
                "http://presidio-anonymizer:3000/anonymize"
            }
        }
    }
}

/// Main Veil configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VeilConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, production)
    #[serde(default)]
    pub environment: Environment,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Entity detector endpoint
    #[serde(default)]
    pub detector: ServiceConfig,

    /// Redactor endpoint
    #[serde(default)]
    pub redactor: ServiceConfig,

    /// Masking rules by entity type; empty means the built-in table
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub policy: BTreeMap<String, MaskingOperation>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VeilConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.detector.validate("detector")?;
        self.redactor.validate("redactor")?;
        self.policy_table().map_err(|e| e.to_string())?;
        self.logging.validate()?;
        Ok(())
    }

    /// Effective detector URL (configured or environment default)
    pub fn detector_url(&self) -> &str {
        self.detector
            .url
            .as_deref()
            .unwrap_or_else(|| self.environment.default_url(Service::Detector))
    }

    /// Effective redactor URL (configured or environment default)
    pub fn redactor_url(&self) -> &str {
        self.redactor
            .url
            .as_deref()
            .unwrap_or_else(|| self.environment.default_url(Service::Redactor))
    }

    /// Build the policy table from the `[policy]` section
    ///
    /// An empty section yields [`PolicyTable::builtin`].
    pub fn policy_table(&self) -> VeilResult<PolicyTable> {
        if self.policy.is_empty() {
            Ok(PolicyTable::builtin())
        } else {
            PolicyTable::from_operations(self.policy.clone())
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// End-to-end budget for one anonymization (both stages)
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.bind_address.parse::<SocketAddr>().map_err(|e| {
            format!(
                "Invalid server.bind_address '{}': {}",
                self.bind_address, e
            )
        })?;

        if self.request_timeout_seconds == 0 {
            return Err("server.request_timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }

    /// End-to-end request budget
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

/// Upstream service (detector or redactor) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Endpoint URL; defaults depend on `environment`
    #[serde(default)]
    pub url: Option<String>,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Optional bearer token sent as `Authorization`
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

impl ServiceConfig {
    fn validate(&self, section: &str) -> Result<(), String> {
        if let Some(ref raw) = self.url {
            let parsed = url::Url::parse(raw)
                .map_err(|e| format!("Invalid {section}.url '{raw}': {e}"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!(
                    "{section}.url must use http or https, got '{}'",
                    parsed.scheme()
                ));
            }
        }

        if self.timeout_seconds == 0 {
            return Err(format!("{section}.timeout_seconds must be > 0"));
        }
        Ok(())
    }

    /// Per-call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_seconds: default_timeout_seconds(),
            api_key: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Emit console logs as JSON
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must be set when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            json: false,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
