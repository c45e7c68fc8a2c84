//! Redactor wire models

use crate::anonymization::policy::{MaskingOperation, PolicyTable};
use crate::domain::DetectionSpan;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outbound redaction request
///
/// `analyzer_results` is the detector output as received; `anonymizers`
/// always contains a `DEFAULT` entry.
#[derive(Debug, Serialize)]
pub struct RedactRequest<'a> {
    /// Original text
    pub text: &'a str,
    /// Detector spans, forwarded verbatim
    pub analyzer_results: &'a [DetectionSpan],
    /// Entity type to operator mapping
    pub anonymizers: BTreeMap<String, MaskingOperation>,
}

impl<'a> RedactRequest<'a> {
    /// Build the request for `spans` under `policy`
    pub fn new(text: &'a str, spans: &'a [DetectionSpan], policy: &PolicyTable) -> Self {
        Self {
            text,
            analyzer_results: spans,
            anonymizers: policy.anonymizers_for(spans),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let spans = vec![DetectionSpan::new(0, 8, "PERSON", 0.9)];
        let policy = PolicyTable::builtin();
        let body = serde_json::to_value(RedactRequest::new("John Doe called me", &spans, &policy))
            .unwrap();

        assert_eq!(
            body,
            json!({
                "text": "John Doe called me",
                "analyzer_results": [
                    {"start": 0, "end": 8, "entity_type": "PERSON", "score": 0.9}
                ],
                "anonymizers": {
                    "DEFAULT": {"type": "replace", "new_value": "ANONYMIZED"},
                    "PERSON": {
                        "type": "mask",
                        "masking_char": "*",
                        "chars_to_mask": 3,
                        "from_end": true
                    }
                }
            })
        );
    }

    #[test]
    fn test_spans_keep_detector_order() {
        let spans = vec![
            DetectionSpan::new(20, 28, "PHONE_NUMBER", 0.7),
            DetectionSpan::new(0, 8, "PERSON", 0.9),
            DetectionSpan::new(0, 8, "EMAIL_ADDRESS", 0.6),
        ];
        let policy = PolicyTable::builtin();
        let body = serde_json::to_value(RedactRequest::new(&"x".repeat(30), &spans, &policy))
            .unwrap();

        let order: Vec<&str> = body["analyzer_results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|span| span["entity_type"].as_str().unwrap())
            .collect();
        assert_eq!(order, vec!["PHONE_NUMBER", "PERSON", "EMAIL_ADDRESS"]);
    }

    #[test]
    fn test_request_body_without_spans() {
        let policy = PolicyTable::builtin();
        let body = serde_json::to_value(RedactRequest::new("nothing here", &[], &policy)).unwrap();

        assert_eq!(body["analyzer_results"], json!([]));
        assert_eq!(
            body["anonymizers"],
            json!({"DEFAULT": {"type": "replace", "new_value": "ANONYMIZED"}})
        );
    }
}
