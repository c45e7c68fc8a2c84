//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Veil using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code for success
pub const EXIT_OK: i32 = 0;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for a failed anonymization
pub const EXIT_ANONYMIZE: i32 = 3;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Veil - text anonymization gateway
#[derive(Parser, Debug)]
#[command(name = "veil")]
#[command(version, about, long_about = None)]
#[command(author = "Veil Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "veil.toml", env = "VEIL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VEIL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP anonymization service
    Serve(commands::serve::ServeArgs),

    /// Anonymize a single piece of text and print the result
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["veil", "serve"]);
        assert_eq!(cli.config, "veil.toml");
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["veil", "--config", "custom.toml", "serve"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["veil", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["veil", "anonymize", "--text", "John Doe called me"]);
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.text.as_deref(), Some("John Doe called me"));
                assert_eq!(args.language, "en");
                assert!(!args.json);
            }
            other => panic!("Expected anonymize, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_anonymize_text_and_file_conflict() {
        let parsed = Cli::try_parse_from([
            "veil",
            "anonymize",
            "--text",
            "a",
            "--file",
            "input.txt",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["veil", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
