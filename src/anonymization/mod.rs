//! Text anonymization pipeline
//!
//! The pipeline consists of two external stages driven by one orchestrator:
//! - **Detection**: an entity detector reports sensitive spans
//! - **Redaction**: a redactor masks those spans using the [`PolicyTable`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use veil::anonymization::Orchestrator;
//!
//! let orchestrator = Orchestrator::from_config(&config)?;
//! let result = orchestrator.anonymize(&request).await?;
//! ```

pub mod orchestrator;
pub mod policy;

pub use orchestrator::Orchestrator;
pub use policy::{MaskingOperation, MaskingRule, PolicyTable, DEFAULT_ENTITY};
