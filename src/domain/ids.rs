//! Request identifier newtype
//!
//! Every anonymization invocation carries a [`RequestId`] that is attached to
//! its tracing span, so log records of the two upstream calls can be
//! correlated.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Longest caller-supplied identifier that is accepted verbatim
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use veil::domain::ids::RequestId;
///
/// let id = RequestId::new("req-42").unwrap();
/// assert_eq!(id.as_str(), "req-42");
///
/// let generated = RequestId::generate();
/// assert!(!generated.as_str().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Creates a RequestId from a caller-supplied string
    ///
    /// Rejects blank values, values longer than 128 bytes and values with
    /// characters outside the visible ASCII range.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Request ID cannot be empty".to_string());
        }
        if id.len() > MAX_REQUEST_ID_LEN {
            return Err(format!(
                "Request ID too long ({} bytes, max {MAX_REQUEST_ID_LEN})",
                id.len()
            ));
        }
        if !id.chars().all(|c| c.is_ascii_graphic()) {
            return Err("Request ID must be visible ASCII".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh random (UUID v4) identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
