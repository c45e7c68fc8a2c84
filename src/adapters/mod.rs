//! Adapters for the external collaborators
//!
//! - [`detector`] - entity detection service
//! - [`redactor`] - redaction service
//!
//! Both are consumed through traits so the orchestrator does not depend on
//! the transport.

pub mod detector;
mod http;
pub mod redactor;

pub use detector::{EntityDetector, HttpDetectorClient};
pub use redactor::{HttpRedactorClient, Redactor};
