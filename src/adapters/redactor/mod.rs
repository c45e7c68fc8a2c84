//! Redactor adapter
//!
//! [`Redactor`] abstracts the external service that applies masking rules
//! to detected spans.

pub mod client;
pub mod models;

pub use client::HttpRedactorClient;
pub use models::RedactRequest;

use crate::anonymization::policy::PolicyTable;
use crate::domain::{AnonymizeResult, DetectionSpan, RedactionError};
use async_trait::async_trait;

/// Trait for redactor implementations
#[async_trait]
pub trait Redactor: Send + Sync {
    /// Apply `policy` to `spans` of `text`
    ///
    /// An empty `spans` slice is valid. The returned items are ordered by
    /// ascending start.
    ///
    /// # Errors
    ///
    /// Returns [`RedactionError`] on transport failure, non-success status
    /// or an undecodable response. Nothing is retried.
    async fn redact(
        &self,
        text: &str,
        spans: &[DetectionSpan],
        policy: &PolicyTable,
    ) -> Result<AnonymizeResult, RedactionError>;

    /// Endpoint identifier for logs
    fn endpoint(&self) -> &str;
}
