// Veil - Text Anonymization Gateway
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

//! # Veil - text anonymization gateway
//!
//! Veil accepts free-form text and returns it with sensitive entities
//! (names, phone numbers, card numbers, ...) masked. It does not detect or
//! mask anything itself; it orchestrates two external services:
//!
//! 1. an **entity detector** that reports typed spans with confidence scores
//! 2. a **redactor** that rewrites the text, applying one masking rule per
//!    entity type from the [`anonymization::PolicyTable`]
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP surface (axum)
//! - [`anonymization`] - Orchestrator and masking policy
//! - [`adapters`] - Detector and redactor clients
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veil::anonymization::Orchestrator;
//! use veil::config::load_or_default;
//! use veil::domain::AnonymizeRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_or_default("veil.toml")?;
//!     let orchestrator = Orchestrator::from_config(&config)?;
//!
//!     let request = AnonymizeRequest::new("John Doe called me", "en");
//!     let result = orchestrator.anonymize(&request).await?;
//!
//!     // "John *** called me" with the built-in policy
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All library errors are [`domain::VeilError`]. Stage failures carry the
//! failing [`domain::Stage`], the upstream status when one was received, and
//! a short cause:
//!
//! ```rust
//! use veil::domain::{DetectionError, Stage, VeilError};
//!
//! let err: VeilError = DetectionError::upstream(503, "detector responded with status 503").into();
//! assert_eq!(err.stage(), Some(Stage::Detect));
//! ```

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod server;
