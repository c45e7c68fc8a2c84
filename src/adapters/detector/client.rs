//! HTTP entity detector client
//!
//! Posts `{text, language}` to the detector endpoint and decodes the JSON
//! array of spans it answers with.

use super::EntityDetector;
use crate::adapters::http::{build_client, describe_transport_error, with_auth};
use crate::config::{SecretString, ServiceConfig, VeilConfig};
use crate::domain::{DetectionError, DetectionSpan, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    text: &'a str,
    language: &'a str,
}

/// Detector client over HTTP
///
/// # Example
///
/// ```no_run
/// use veil::adapters::detector::{EntityDetector, HttpDetectorClient};
/// use veil::config::ServiceConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpDetectorClient::new(
///     "http://localhost:5002/analyze",
///     &ServiceConfig::default(),
/// )?;
/// let spans = client.detect("John Doe called me", "en").await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpDetectorClient {
    url: String,
    client: Client,
    api_key: Option<SecretString>,
}

impl HttpDetectorClient {
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
        Self::new(config.detector_url(), &config.detector)
    }
}

#[async_trait]
impl EntityDetector for HttpDetectorClient {
    async fn detect(
        &self,
        text: &str,
        language: &str,
    ) -> std::result::Result<Vec<DetectionSpan>, DetectionError> {
        let started = Instant::now();
        tracing::debug!(
            endpoint = %self.url,
            text_len = text.len(),
            language = %language,
            "Sending detection request"
        );

        let request = self
            .client
            .post(&self.url)
            .json(&DetectRequest { text, language });
        let response = with_auth(request, self.api_key.as_ref())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(endpoint = %self.url, error = %e, "Detector unreachable");
                DetectionError::transport(describe_transport_error(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                endpoint = %self.url,
                status = status.as_u16(),
                "Detector returned non-success status"
            );
            return Err(DetectionError::upstream(
                status.as_u16(),
                format!("detector responded with status {}", status.as_u16()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DetectionError::transport(describe_transport_error(&e)))?;

        let spans: Vec<DetectionSpan> =
            serde_json::from_slice(&body).map_err(DetectionError::malformed)?;

        tracing::debug!(
            endpoint = %self.url,
            spans = spans.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Detection response decoded"
        );

        Ok(spans)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
