//! Serve command implementation
//!
//! This module implements the `serve` command, which runs the HTTP
//! anonymization service until a shutdown signal arrives.

use crate::anonymization::Orchestrator;
use crate::cli::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_or_default;
use crate::server;
use clap::Args;
use std::net::SocketAddr;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the bind address (e.g. 127.0.0.1:8080)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(config_path = %config_path, error = %e, "Failed to load configuration");
                eprintln!("Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if let Some(bind) = self.bind {
            tracing::info!(bind = %bind, "Overriding bind address from CLI");
            config.server.bind_address = bind.to_string();
        }

        let bind: SocketAddr = match config.server.bind_address.parse() {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!(
                    "Error: invalid server.bind_address '{}': {e}",
                    config.server.bind_address
                );
                return Ok(EXIT_CONFIG);
            }
        };

        let orchestrator = match Orchestrator::from_config(&config) {
            Ok(orchestrator) => orchestrator,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build orchestrator");
                eprintln!("Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        tracing::info!(
            environment = ?config.environment,
            bind = %bind,
            "Starting Veil server"
        );

        server::serve(bind, orchestrator, shutdown_signal).await?;
        Ok(EXIT_OK)
    }
}
