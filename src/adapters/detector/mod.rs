//! Entity detector adapter
//!
//! [`EntityDetector`] abstracts the external detection service so the
//! orchestrator can be driven by the HTTP client in production and by stubs
//! in tests.

pub mod client;

pub use client::HttpDetectorClient;

use crate::domain::{DetectionError, DetectionSpan};
use async_trait::async_trait;

/// Trait for entity detector implementations
#[async_trait]
pub trait EntityDetector: Send + Sync {
    /// Detect sensitive spans in `text`
    ///
    /// Spans are returned in the order the detector reported them.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionError`] on transport failure, non-success status
    /// or an undecodable response. Nothing is retried.
    async fn detect(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<DetectionSpan>, DetectionError>;

    /// Endpoint identifier for logs
    fn endpoint(&self) -> &str;
}
