//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables take `ENV_MUTEX` to avoid
//! interfering with each other.

use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use veil::anonymization::{MaskingOperation, PolicyTable};
use veil::config::{load_config, load_or_default, Environment};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for name in [
        "VEIL_APPLICATION_LOG_LEVEL",
        "VEIL_ENVIRONMENT",
        "VEIL_SERVER_BIND_ADDRESS",
        "VEIL_SERVER_REQUEST_TIMEOUT_SECONDS",
        "VEIL_DETECTOR_URL",
        "VEIL_DETECTOR_TIMEOUT_SECONDS",
        "VEIL_DETECTOR_API_KEY",
        "VEIL_REDACTOR_URL",
        "VEIL_REDACTOR_TIMEOUT_SECONDS",
        "VEIL_REDACTOR_API_KEY",
        "VEIL_LOGGING_LOCAL_ENABLED",
        "VEIL_LOGGING_LOCAL_PATH",
        "VEIL_LOGGING_JSON",
        "TEST_VEIL_REDACTOR_KEY",
    ] {
        std::env::remove_var(name);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r##"
environment = "production"

[application]
log_level = "warn"

[server]
bind_address = "127.0.0.1:9000"
request_timeout_seconds = 12

[detector]
timeout_seconds = 4

[redactor]
url = "https://redactor.internal/anonymize"
timeout_seconds = 6

[policy.DEFAULT]
type = "replace"
new_value = "<REDACTED>"

[policy.EMAIL_ADDRESS]
type = "mask"
masking_char = "#"
chars_to_mask = 5

[logging]
local_enabled = false
local_rotation = "hourly"
json = true
"##,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.server.request_timeout_seconds, 12);
    // No detector URL configured: production default applies
    assert_eq!(config.detector_url(), "http://presidio-analyzer:3000/analyze");
    assert_eq!(config.redactor_url(), "https://redactor.internal/anonymize");
    assert!(config.logging.json);

    let policy = config.policy_table().unwrap();
    assert_eq!(
        policy.lookup("EMAIL_ADDRESS").operation,
        MaskingOperation::mask('#', 5, false)
    );
    assert_eq!(
        policy.lookup("PERSON").operation,
        MaskingOperation::replace("<REDACTED>")
    );
}

#[test]
fn test_policy_without_default_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[policy.PERSON]
type = "replace"
new_value = "<PERSON>"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("DEFAULT"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[server]
request_timeout_seconds = 30

[detector]
url = "http://localhost:5002/analyze"
"#,
    );

    std::env::set_var("VEIL_SERVER_REQUEST_TIMEOUT_SECONDS", "5");
    std::env::set_var("VEIL_DETECTOR_URL", "http://detector.test/analyze");
    std::env::set_var("VEIL_DETECTOR_API_KEY", "env-secret");

    let config = load_config(file.path());
    cleanup_env_vars();
    let config = config.unwrap();

    assert_eq!(config.server.request_timeout_seconds, 5);
    assert_eq!(config.detector_url(), "http://detector.test/analyze");
    assert_eq!(
        config.detector.api_key.as_ref().unwrap().expose_secret(),
        "env-secret"
    );
    assert!(!format!("{config:?}").contains("env-secret"));
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("TEST_VEIL_REDACTOR_KEY", "substituted-key");
    let file = write_config(
        r#"
[redactor]
api_key = "${TEST_VEIL_REDACTOR_KEY}"
"#,
    );

    let config = load_config(file.path());
    cleanup_env_vars();

    let config = config.unwrap();
    assert_eq!(
        config.redactor.api_key.as_ref().unwrap().expose_secret(),
        "substituted-key"
    );
}

#[test]
fn test_invalid_env_override_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("VEIL_DETECTOR_TIMEOUT_SECONDS", "soon");
    let result = load_or_default("/nonexistent/veil.toml");
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_invalid_logging_flag_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("VEIL_LOGGING_JSON", "yes");
    let result = load_or_default("/nonexistent/veil.toml");
    cleanup_env_vars();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("VEIL_LOGGING_JSON"));

    std::env::set_var("VEIL_LOGGING_LOCAL_ENABLED", "true");
    let config = load_or_default("/nonexistent/veil.toml");
    cleanup_env_vars();

    assert!(config.unwrap().logging.local_enabled);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let config = load_or_default("/nonexistent/veil.toml").unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.server.bind_address, "0.0.0.0:3000");
    assert_eq!(config.redactor_url(), "http://localhost:5001/anonymize");
    assert_eq!(config.policy_table().unwrap(), PolicyTable::builtin());
}

#[test]
fn test_non_http_url_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[detector]
url = "ftp://detector.test/analyze"
"#,
    );

    assert!(load_config(file.path()).is_err());
}
