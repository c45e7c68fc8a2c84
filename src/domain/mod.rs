//! Domain models and types for Veil.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Request/result models** ([`AnonymizeRequest`], [`AnonymizeResult`], [`AnonymizedItem`])
//! - **Detector output** ([`DetectionSpan`])
//! - **Identifiers** ([`RequestId`])
//! - **Error types** ([`VeilError`], [`DetectionError`], [`RedactionError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VeilError>`]:
//!
//! ```rust
//! use veil::domain::{AnonymizeRequest, Result};
//!
//! fn example() -> Result<()> {
//!     AnonymizeRequest::new("John Doe called me", "en").validate()?;
//!     Ok(())
//! }
//! ```

pub mod anonymize;
pub mod errors;
pub mod ids;
pub mod result;
pub mod span;

// Re-export commonly used types for convenience
pub use anonymize::{AnonymizeRequest, AnonymizeResult, AnonymizedItem};
pub use errors::{DetectionError, RedactionError, Stage, VeilError};
pub use ids::RequestId;
pub use result::Result;
pub use span::DetectionSpan;
