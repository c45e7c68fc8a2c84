//! HTTP redactor client

use super::models::RedactRequest;
use super::Redactor;
use crate::adapters::http::{build_client, describe_transport_error, with_auth};
use crate::anonymization::policy::PolicyTable;
use crate::config::{SecretString, ServiceConfig, VeilConfig};
use crate::domain::{AnonymizeResult, DetectionSpan, RedactionError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;

/// Redactor client over HTTP
pub struct HttpRedactorClient {
    url: String,
    client: Client,
    api_key: Option<SecretString>,
}

impl HttpRedactorClient {
    /// Create a client for `url` with the timeout and key from `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: build_client(config)?,
            api_key: config.api_key.clone(),
        })
    }

    /// Create a client from the process configuration
    pub fn from_config(config: &VeilConfig) -> Result<Self> {
        Self::new(config.redactor_url(), &config.redactor)
    }
}

#[async_trait]
impl Redactor for HttpRedactorClient {
    async fn redact(
        &self,
        text: &str,
        spans: &[DetectionSpan],
        policy: &PolicyTable,
    ) -> std::result::Result<AnonymizeResult, RedactionError> {
        let started = Instant::now();
        let body = RedactRequest::new(text, spans, policy);

        tracing::debug!(
            endpoint = %self.url,
            spans = spans.len(),
            rules = body.anonymizers.len(),
            "Sending redaction request"
        );

        let request = self.client.post(&self.url).json(&body);
        let response = with_auth(request, self.api_key.as_ref())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(endpoint = %self.url, error = %e, "Redactor unreachable");
                RedactionError::transport(describe_transport_error(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                endpoint = %self.url,
                status = status.as_u16(),
                "Redactor returned non-success status"
            );
            return Err(RedactionError::upstream(
                status.as_u16(),
                format!("redactor responded with status {}", status.as_u16()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RedactionError::transport(describe_transport_error(&e)))?;

        let mut result: AnonymizeResult =
            serde_json::from_slice(&bytes).map_err(RedactionError::malformed)?;
        result.check_items().map_err(RedactionError::malformed)?;
        result.sort_items();

        tracing::debug!(
            endpoint = %self.url,
            items = result.items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Redaction response decoded"
        );

        Ok(result)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
