//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Veil configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config, VeilConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates; a config that loads is valid.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print!("{}", summary(&config));
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}

/// Human readable summary; API keys are reported as set or unset only
fn summary(config: &VeilConfig) -> String {
    let key_state = |set: bool| if set { "set" } else { "not set" };

    let mut out = String::from("Configuration Summary:\n");
    out.push_str(&format!("  Environment: {:?}\n", config.environment));
    out.push_str(&format!("  Log Level: {}\n", config.application.log_level));
    out.push_str(&format!("  Bind Address: {}\n", config.server.bind_address));
    out.push_str(&format!(
        "  Request Timeout: {}s\n",
        config.server.request_timeout_seconds
    ));
    out.push_str(&format!(
        "  Detector: {} (timeout {}s, api key {})\n",
        config.detector_url(),
        config.detector.timeout_seconds,
        key_state(config.detector.api_key.is_some())
    ));
    out.push_str(&format!(
        "  Redactor: {} (timeout {}s, api key {})\n",
        config.redactor_url(),
        config.redactor.timeout_seconds,
        key_state(config.redactor.api_key.is_some())
    ));

    if let Ok(policy) = config.policy_table() {
        out.push_str(&format!("  Policy Rules: {}\n", policy.len()));
        for rule in policy.rules() {
            out.push_str(&format!(
                "    {}: {}\n",
                rule.entity_type,
                rule.operation.kind()
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_summary_lists_default_rules() {
        let text = summary(&VeilConfig::default());
        assert!(text.contains("http://localhost:5002/analyze"));
        assert!(text.contains("DEFAULT: replace"));
        assert!(text.contains("CREDIT_CARD: mask"));
    }

    #[test]
    fn test_summary_hides_api_key() {
        let mut config = VeilConfig::default();
        config.detector.api_key = Some(secret_string("super-secret".to_string()));

        let text = summary(&config);
        assert!(!text.contains("super-secret"));
        assert!(text.contains("api key set"));
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("/nonexistent/veil.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
