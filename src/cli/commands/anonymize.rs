//! Anonymize command implementation
//!
//! This module implements the `anonymize` command, a one-shot run of the
//! two-stage pipeline against the configured services.

use crate::anonymization::Orchestrator;
use crate::cli::{EXIT_ANONYMIZE, EXIT_CONFIG, EXIT_OK};
use crate::config::load_or_default;
use crate::domain::{AnonymizeRequest, RequestId};
use anyhow::Context;
use clap::Args;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::watch;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Text to anonymize
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file instead (stdin when neither is given)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Language hint passed to the detector
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Print the full result (text and items) as JSON
    #[arg(long)]
    pub json: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = match load_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let orchestrator = match Orchestrator::from_config(&config) {
            Ok(orchestrator) => orchestrator,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let text = self.read_input().await?;
        let request = AnonymizeRequest::new(text, self.language.clone());

        // Dropping the pipeline future on shutdown cancels the call in flight
        let outcome = tokio::select! {
            outcome = orchestrator.anonymize_with_id(&request, RequestId::generate()) => outcome,
            _ = shutdown_signal.changed() => {
                eprintln!("Anonymization cancelled");
                return Ok(EXIT_ANONYMIZE);
            }
        };

        match outcome {
            Ok(result) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{}", result.text);
                }
                Ok(EXIT_OK)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Ok(EXIT_ANONYMIZE)
            }
        }
    }

    async fn read_input(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        if let Some(path) = &self.file {
            return tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read input file {path}"));
        }

        read_all(tokio::io::stdin())
            .await
            .context("Failed to read text from stdin")
    }
}

async fn read_all<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<String> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer).await?;
    Ok(buffer)
}
