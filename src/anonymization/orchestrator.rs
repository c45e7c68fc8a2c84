//! Two-stage anonymization orchestrator
//!
//! This module provides the [`Orchestrator`] that sequences entity detection
//! and redaction for one piece of text.
//!
//! # Architecture
//!
//! The orchestrator coordinates three components:
//! - **Detector**: reports sensitive spans ([`EntityDetector`])
//! - **Redactor**: applies masking rules to those spans ([`Redactor`])
//! - **Policy table**: masking rule per entity type ([`PolicyTable`])
//!
//! The stages run strictly in sequence and fail fast: a detection failure
//! means the redactor is never called, and there is no partial result.
//!
//! # Examples
//!
//! ```no_run
//! use veil::anonymization::Orchestrator;
//! use veil::config::VeilConfig;
//! use veil::domain::AnonymizeRequest;
//!
//! # async fn example() -> veil::domain::Result<()> {
//! let orchestrator = Orchestrator::from_config(&VeilConfig::default())?;
//!
//! let request = AnonymizeRequest::new("John Doe called me", "en");
//! let result = orchestrator.anonymize(&request).await?;
//! println!("{} ({} redactions)", result.text, result.items.len());
//! # Ok(())
//! # }
//! ```

use crate::adapters::{EntityDetector, HttpDetectorClient, HttpRedactorClient, Redactor};
use crate::anonymization::policy::PolicyTable;
use crate::config::VeilConfig;
use crate::domain::span::char_len;
use crate::domain::{
    AnonymizeRequest, AnonymizeResult, DetectionError, DetectionSpan, RedactionError, RequestId,
    Result, Stage, VeilError,
};
use crate::{log_stage_complete, log_stage_failure, log_stage_start};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::Instrument;

/// Cause reported when the end-to-end budget runs out
const TIMED_OUT: &str = "timed out";

/// Anonymization orchestrator
///
/// # Thread Safety
///
/// The orchestrator holds only shared, immutable state and can be cloned
/// cheaply or shared across tasks behind an `Arc`. Concurrent invocations do
/// not coordinate with each other.
#[derive(Clone)]
pub struct Orchestrator {
    detector: Arc<dyn EntityDetector>,
    redactor: Arc<dyn Redactor>,
    policy: Arc<PolicyTable>,
    request_timeout: Duration,
}

impl Orchestrator {
    /// Create an orchestrator from its collaborators
    ///
    /// `request_timeout` bounds a whole invocation, both stages included.
    pub fn new(
        detector: Arc<dyn EntityDetector>,
        redactor: Arc<dyn Redactor>,
        policy: Arc<PolicyTable>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            detector,
            redactor,
            policy,
            request_timeout,
        }
    }

    /// Create an orchestrator with HTTP clients from the process configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the policy table is invalid or an
    /// HTTP client cannot be built.
    pub fn from_config(config: &VeilConfig) -> Result<Self> {
        let detector = HttpDetectorClient::from_config(config)?;
        let redactor = HttpRedactorClient::from_config(config)?;
        let policy = config.policy_table()?;

        tracing::info!(
            detector = %config.detector_url(),
            redactor = %config.redactor_url(),
            rules = policy.len(),
            request_timeout_secs = config.server.request_timeout_seconds,
            "Orchestrator configured"
        );

        Ok(Self::new(
            Arc::new(detector),
            Arc::new(redactor),
            Arc::new(policy),
            config.server.request_timeout(),
        ))
    }

    /// The policy table applied to every request
    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    /// Anonymize `request` under a freshly generated request id
    ///
    /// # Errors
    ///
    /// - [`VeilError::InvalidInput`] if the text or language is empty; no
    ///   external call is made.
    /// - [`VeilError::AnonymizeFailed`] with the failing [`Stage`] otherwise.
    pub async fn anonymize(&self, request: &AnonymizeRequest) -> Result<AnonymizeResult> {
        self.anonymize_with_id(request, RequestId::generate()).await
    }

    /// Anonymize `request`, correlating logs under `request_id`
    ///
    /// Dropping the returned future cancels the call in flight; no later
    /// stage is started.
    pub async fn anonymize_with_id(
        &self,
        request: &AnonymizeRequest,
        request_id: RequestId,
    ) -> Result<AnonymizeResult> {
        let span = tracing::info_span!("anonymize", request_id = %request_id);
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: &AnonymizeRequest) -> Result<AnonymizeResult> {
        if let Err(e) = request.validate() {
            tracing::warn!(error = %e, "Rejected anonymization request");
            return Err(e);
        }

        let started = Instant::now();
        let deadline = started + self.request_timeout;
        let text_len = char_len(&request.text);

        tracing::info!(
            text_len = text_len,
            language = %request.language,
            "Anonymization started"
        );

        let spans = self.detect(request, deadline).await?;
        check_spans(&spans, text_len)?;

        // The budget may already be spent; do not start the second call then
        if Instant::now() >= deadline {
            log_stage_failure!(Stage::Redact, TIMED_OUT);
            return Err(RedactionError::transport(TIMED_OUT).into());
        }

        let result = self.redact(request, &spans, deadline).await?;

        tracing::info!(
            spans = spans.len(),
            items = result.items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Anonymization completed"
        );

        Ok(result)
    }

    async fn detect(
        &self,
        request: &AnonymizeRequest,
        deadline: Instant,
    ) -> Result<Vec<DetectionSpan>> {
        let stage_started = Instant::now();
        log_stage_start!(Stage::Detect, self.detector.endpoint());

        let outcome = timeout_at(
            deadline,
            self.detector.detect(&request.text, &request.language),
        )
        .await
        .unwrap_or_else(|_| Err(DetectionError::transport(TIMED_OUT)));

        match outcome {
            Ok(spans) => {
                log_stage_complete!(Stage::Detect, stage_started.elapsed(), spans.len());
                Ok(spans)
            }
            Err(e) => {
                log_stage_failure!(Stage::Detect, &e.cause, e.status);
                Err(e.into())
            }
        }
    }

    async fn redact(
        &self,
        request: &AnonymizeRequest,
        spans: &[DetectionSpan],
        deadline: Instant,
    ) -> Result<AnonymizeResult> {
        let stage_started = Instant::now();
        log_stage_start!(Stage::Redact, self.redactor.endpoint());

        let outcome = timeout_at(
            deadline,
            self.redactor.redact(&request.text, spans, &self.policy),
        )
        .await
        .unwrap_or_else(|_| Err(RedactionError::transport(TIMED_OUT)));

        match outcome {
            Ok(result) => {
                log_stage_complete!(Stage::Redact, stage_started.elapsed(), result.items.len());
                Ok(result)
            }
            Err(e) => {
                log_stage_failure!(Stage::Redact, &e.cause, e.status);
                Err(e.into())
            }
        }
    }
}

/// Reject detector output that does not fit the submitted text
///
/// Overlapping spans are accepted and forwarded as reported.
fn check_spans(spans: &[DetectionSpan], text_len: usize) -> Result<()> {
    for span in spans {
        if let Err(cause) = span.check_bounds(text_len) {
            log_stage_failure!(Stage::Detect, &cause);
            return Err(VeilError::from(DetectionError::transport(cause)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_spans_accepts_overlaps() {
        let spans = vec![
            DetectionSpan::new(0, 8, "PERSON", 0.9),
            DetectionSpan::new(5, 8, "LOCATION", 0.4),
        ];
        assert!(check_spans(&spans, 18).is_ok());
    }

    #[test]
    fn test_check_spans_rejects_out_of_bounds() {
        let spans = vec![DetectionSpan::new(10, 30, "PERSON", 0.9)];
        let err = check_spans(&spans, 18).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Detect));
        assert!(err.details().contains("span out of bounds"));
    }

    #[test]
    fn test_from_config_uses_builtin_policy() {
        let orchestrator = Orchestrator::from_config(&VeilConfig::default()).unwrap();
        assert_eq!(orchestrator.policy(), &PolicyTable::builtin());
    }
}
