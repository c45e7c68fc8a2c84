//! Detected entity spans
//!
//! A [`DetectionSpan`] is one entry of the detector's response array. Offsets
//! are half-open and counted in Unicode scalar values (chars), matching the
//! detector's transport. Fields other than the four known ones are kept in
//! [`DetectionSpan::extra`] so the detector output can be forwarded to the
//! redactor without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A sensitive span reported by the entity detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSpan {
    /// Inclusive start offset
    pub start: usize,

    /// Exclusive end offset
    pub end: usize,

    /// Entity type name (e.g. `PERSON`, `PHONE_NUMBER`)
    pub entity_type: String,

    /// Detector confidence in `[0, 1]`
    pub score: f64,

    /// Detector-specific fields, forwarded untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DetectionSpan {
    /// Create a span without detector-specific extras
    pub fn new(start: usize, end: usize, entity_type: impl Into<String>, score: f64) -> Self {
        Self {
            start,
            end,
            entity_type: entity_type.into(),
            score,
            extra: Map::new(),
        }
    }

    /// Check the span against a text of `text_len` chars
    ///
    /// A valid span satisfies `start < end <= text_len`.
    pub fn check_bounds(&self, text_len: usize) -> Result<(), String> {
        if self.start >= self.end {
            return Err(format!(
                "span out of bounds: {} [{}, {}) is empty or inverted",
                self.entity_type, self.start, self.end
            ));
        }
        if self.end > text_len {
            return Err(format!(
                "span out of bounds: {} [{}, {}) exceeds text length {}",
                self.entity_type, self.start, self.end, text_len
            ));
        }
        if !(0.0..=1.0).contains(&self.score) {
            return Err(format!(
                "score out of range: {} has score {}",
                self.entity_type, self.score
            ));
        }
        Ok(())
    }
}

/// Length of `text` in the offset unit used by spans
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
