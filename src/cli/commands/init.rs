//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "veil.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Veil configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your service endpoints", self.output);
                println!("  2. Put API keys in a .env file (VEIL_DETECTOR_API_KEY, VEIL_REDACTOR_API_KEY)");
                println!("  3. Validate configuration: veil validate-config");
                println!("  4. Start the service: veil serve");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Sample configuration with every section and the built-in policy
pub fn sample_config() -> &'static str {
    r#"# Veil Configuration File
# Text anonymization gateway

# Runtime environment: development | production
# Selects default service URLs when [detector].url / [redactor].url are unset
environment = "development"

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[server]
bind_address = "0.0.0.0:3000"
# End-to-end budget for one anonymization, both stages included
request_timeout_seconds = 30

[detector]
url = "http://localhost:5002/analyze"
timeout_seconds = 10
# api_key = "${VEIL_DETECTOR_API_KEY}"

[redactor]
url = "http://localhost:5001/anonymize"
timeout_seconds = 10
# api_key = "${VEIL_REDACTOR_API_KEY}"

# Masking rules by entity type. DEFAULT is required and applies to every
# entity type without its own rule.
[policy.DEFAULT]
type = "replace"
new_value = "ANONYMIZED"

[policy.CREDIT_CARD]
type = "mask"
masking_char = "*"
chars_to_mask = 4
from_end = true

[policy.PHONE_NUMBER]
type = "mask"
masking_char = "*"
chars_to_mask = 7
from_end = true

[policy.PERSON]
type = "mask"
masking_char = "*"
chars_to_mask = 3
from_end = true

[policy.US_DRIVER_LICENSE]
type = "mask"
masking_char = "*"
chars_to_mask = 4
from_end = true

[logging]
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
json = false
"#
}
