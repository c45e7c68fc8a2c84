//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VeilConfig;
use super::secret::secret_string;
use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VeilConfig
/// 4. Applies environment variable overrides (VEIL_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use veil::config::loader::load_config;
///
/// let config = load_config("veil.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VeilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VeilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VeilError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from `path` if it exists, defaults otherwise
///
/// Environment overrides and validation apply in both cases, so a
/// deployment can be configured through `VEIL_*` variables alone.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<VeilConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::info!(
        path = %path.display(),
        "Configuration file not found, using defaults and environment overrides"
    );
    finish(VeilConfig::default())
}

/// Parses configuration from TOML text
///
/// Applies `${VAR}` substitution, `VEIL_*` overrides and validation.
pub fn parse_config(contents: &str) -> Result<VeilConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: VeilConfig = toml::from_str(&contents)
        .map_err(|e| VeilError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

fn finish(mut config: VeilConfig) -> Result<VeilConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        VeilError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VeilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        VeilError::Configuration(format!("Invalid value for {name}: '{value}'"))
    })
}

/// Applies environment variable overrides using VEIL_* prefix
///
/// Environment variables follow the pattern: VEIL_<SECTION>_<KEY>
/// For example: VEIL_DETECTOR_URL, VEIL_SERVER_BIND_ADDRESS
fn apply_env_overrides(config: &mut VeilConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("VEIL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("VEIL_ENVIRONMENT") {
        config.environment = match val.to_lowercase().as_str() {
            "development" => super::schema::Environment::Development,
            "production" => super::schema::Environment::Production,
            _ => {
                return Err(VeilError::Configuration(format!(
                    "Invalid VEIL_ENVIRONMENT: {val}"
                )))
            }
        };
    }

    // Server overrides
    if let Ok(val) = std::env::var("VEIL_SERVER_BIND_ADDRESS") {
        config.server.bind_address = val;
    }
    if let Ok(val) = std::env::var("VEIL_SERVER_REQUEST_TIMEOUT_SECONDS") {
        config.server.request_timeout_seconds =
            parse_env("VEIL_SERVER_REQUEST_TIMEOUT_SECONDS", &val)?;
    }

    // Detector overrides
    if let Ok(val) = std::env::var("VEIL_DETECTOR_URL") {
        config.detector.url = Some(val);
    }
    if let Ok(val) = std::env::var("VEIL_DETECTOR_TIMEOUT_SECONDS") {
        config.detector.timeout_seconds = parse_env("VEIL_DETECTOR_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("VEIL_DETECTOR_API_KEY") {
        config.detector.api_key = Some(secret_string(val));
    }

    // Redactor overrides
    if let Ok(val) = std::env::var("VEIL_REDACTOR_URL") {
        config.redactor.url = Some(val);
    }
    if let Ok(val) = std::env::var("VEIL_REDACTOR_TIMEOUT_SECONDS") {
        config.redactor.timeout_seconds = parse_env("VEIL_REDACTOR_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("VEIL_REDACTOR_API_KEY") {
        config.redactor.api_key = Some(secret_string(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("VEIL_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("VEIL_LOGGING_JSON") {
        config.logging.json = parse_env("VEIL_LOGGING_JSON", &val)?;
    }

    Ok(())
}
