//! Anonymization request and result models

use super::errors::VeilError;
use super::result::Result;
use super::span::char_len;
use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "en".to_string()
}

/// Text submitted for anonymization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizeRequest {
    /// Free-form input text
    pub text: String,

    /// ISO 639-1 language code, passed through to the detector
    #[serde(default = "default_language")]
    pub language: String,
}

impl AnonymizeRequest {
    /// Create a new request
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }

    /// Validate caller input
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::InvalidInput`] if the text or the language tag is
    /// empty. The language is otherwise not interpreted.
    pub fn validate(&self) -> Result<()> {
        if self.text.is_empty() {
            return Err(VeilError::InvalidInput("text must not be empty".to_string()));
        }
        if self.language.trim().is_empty() {
            return Err(VeilError::InvalidInput(
                "language must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One redaction the redactor applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizedItem {
    /// Start offset in the anonymized text
    pub start: usize,

    /// End offset in the anonymized text
    pub end: usize,

    /// Entity type of the span this item replaced
    pub entity_type: String,

    /// Text the redactor reported for this span
    pub text: String,

    /// Operator the redactor applied (`replace`, `mask`, ...)
    pub operator: String,
}

/// Final anonymization output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizeResult {
    /// Anonymized text
    pub text: String,

    /// Applied redactions, ascending by `start`
    #[serde(default)]
    pub items: Vec<AnonymizedItem>,
}

impl AnonymizeResult {
    /// Order items by ascending start, keeping the reported order on ties
    pub fn sort_items(&mut self) {
        self.items.sort_by_key(|item| item.start);
    }

    /// Check every item is non-empty and lies within the anonymized text
    pub fn check_items(&self) -> std::result::Result<(), String> {
        let len = char_len(&self.text);
        for item in &self.items {
            if item.start >= item.end || item.end > len {
                return Err(format!(
                    "item out of bounds: {} [{}, {}) in text of length {}",
                    item.entity_type, item.start, item.end, len
                ));
            }
        }
        Ok(())
    }
}
