//! Masking policy table
//!
//! Maps entity-type names to the masking rule the redactor should apply.
//! The table always holds a `DEFAULT` rule, so [`PolicyTable::lookup`] never
//! fails. It is built once at startup and shared read-only behind an `Arc`.
//!
//! # Examples
//!
//! ```
//! use veil::anonymization::policy::{MaskingOperation, PolicyTable};
//!
//! let table = PolicyTable::builtin();
//! assert!(matches!(table.lookup("PERSON").operation, MaskingOperation::Mask { .. }));
//! assert_eq!(table.lookup("FOO"), table.default_rule());
//! ```

use crate::domain::{DetectionSpan, Result, VeilError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Key of the mandatory fallback rule
pub const DEFAULT_ENTITY: &str = "DEFAULT";

/// How a span of a given entity type is obscured
///
/// Serializes to the redactor's operator shape, e.g.
/// `{"type": "mask", "masking_char": "*", "chars_to_mask": 4, "from_end": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaskingOperation {
    /// Replace the whole span with a fixed value
    Replace {
        /// Replacement text
        new_value: String,
    },
    /// Overwrite some characters of the span with a mask character
    Mask {
        /// Character written over the masked positions
        masking_char: char,
        /// Number of characters to mask
        chars_to_mask: u32,
        /// Mask from the end of the span instead of the start
        #[serde(default)]
        from_end: bool,
    },
}

impl MaskingOperation {
    /// Replace operation
    pub fn replace(new_value: impl Into<String>) -> Self {
        Self::Replace {
            new_value: new_value.into(),
        }
    }

    /// Mask operation
    pub fn mask(masking_char: char, chars_to_mask: u32, from_end: bool) -> Self {
        Self::Mask {
            masking_char,
            chars_to_mask,
            from_end,
        }
    }

    /// Operator name as the redactor reports it
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Replace { .. } => "replace",
            Self::Mask { .. } => "mask",
        }
    }
}

/// Masking rule bound to an entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskingRule {
    /// Entity type this rule applies to (`DEFAULT` for the fallback)
    pub entity_type: String,
    /// Operation to apply
    pub operation: MaskingOperation,
}

/// Immutable entity-type to masking-rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    rules: HashMap<String, MaskingRule>,
    default_rule: MaskingRule,
}

impl PolicyTable {
    /// Build a table from an entity-type to operation mapping
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the `DEFAULT` entry is missing, an
    /// entity type is blank, a mask rule masks zero characters, or a replace
    /// rule has an empty value.
    pub fn from_operations(operations: BTreeMap<String, MaskingOperation>) -> Result<Self> {
        let mut rules = HashMap::with_capacity(operations.len());
        let mut default_rule = None;

        for (entity_type, operation) in operations {
            let entity_type = entity_type.trim().to_string();
            if entity_type.is_empty() {
                return Err(VeilError::Configuration(
                    "policy entity type must not be empty".to_string(),
                ));
            }
            match &operation {
                MaskingOperation::Mask { chars_to_mask, .. } if *chars_to_mask == 0 => {
                    return Err(VeilError::Configuration(format!(
                        "policy.{entity_type}.chars_to_mask must be > 0"
                    )));
                }
                MaskingOperation::Replace { new_value } if new_value.is_empty() => {
                    return Err(VeilError::Configuration(format!(
                        "policy.{entity_type}.new_value must not be empty"
                    )));
                }
                _ => {}
            }

            let rule = MaskingRule {
                entity_type: entity_type.clone(),
                operation,
            };
            if entity_type == DEFAULT_ENTITY {
                default_rule = Some(rule);
            } else {
                rules.insert(entity_type, rule);
            }
        }

        let default_rule = default_rule.ok_or_else(|| {
            VeilError::Configuration(format!(
                "policy table must define a {DEFAULT_ENTITY} rule"
            ))
        })?;

        Ok(Self {
            rules,
            default_rule,
        })
    }

    /// Built-in table used when no policy is configured
    pub fn builtin() -> Self {
        let default_rule = MaskingRule {
            entity_type: DEFAULT_ENTITY.to_string(),
            operation: MaskingOperation::replace("ANONYMIZED"),
        };

        let rules = [
            ("CREDIT_CARD", MaskingOperation::mask('*', 4, true)),
            ("PHONE_NUMBER", MaskingOperation::mask('*', 7, true)),
            ("PERSON", MaskingOperation::mask('*', 3, true)),
            ("US_DRIVER_LICENSE", MaskingOperation::mask('*', 4, true)),
        ]
        .into_iter()
        .map(|(entity_type, operation)| {
            (
                entity_type.to_string(),
                MaskingRule {
                    entity_type: entity_type.to_string(),
                    operation,
                },
            )
        })
        .collect();

        Self {
            rules,
            default_rule,
        }
    }

    /// Rule for `entity_type`, falling back to `DEFAULT`
    pub fn lookup(&self, entity_type: &str) -> &MaskingRule {
        self.rules.get(entity_type).unwrap_or(&self.default_rule)
    }

    /// The mandatory fallback rule
    pub fn default_rule(&self) -> &MaskingRule {
        &self.default_rule
    }

    /// Number of entity-specific rules (excluding `DEFAULT`)
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether only the `DEFAULT` rule is defined
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Operator mapping for an outbound redaction request
    ///
    /// Holds every entity type observed in `spans` plus `DEFAULT`; types
    /// without a rule map to the `DEFAULT` operation.
    pub fn anonymizers_for(&self, spans: &[DetectionSpan]) -> BTreeMap<String, MaskingOperation> {
        let mut anonymizers = BTreeMap::new();
        anonymizers.insert(
            DEFAULT_ENTITY.to_string(),
            self.default_rule.operation.clone(),
        );
        for span in spans {
            anonymizers
                .entry(span.entity_type.clone())
                .or_insert_with(|| self.lookup(&span.entity_type).operation.clone());
        }
        anonymizers
    }

    /// All rules, `DEFAULT` first then sorted by entity type
    pub fn rules(&self) -> Vec<&MaskingRule> {
        let mut rules: Vec<&MaskingRule> = self.rules.values().collect();
        rules.sort_by(|a, b| a.entity_type.cmp(&b.entity_type));
        rules.insert(0, &self.default_rule);
        rules
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::builtin()
    }
}
