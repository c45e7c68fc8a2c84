//! Shared reqwest plumbing for the upstream service clients

use crate::config::{SecretString, ServiceConfig};
use crate::domain::{Result, VeilError};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Connect timeout, capped by the per-call timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a pooled HTTP client honouring the service timeout
pub(crate) fn build_client(config: &ServiceConfig) -> Result<Client> {
    let timeout = config.timeout();
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .build()
        .map_err(|e| VeilError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Attach the bearer token, if one is configured
pub(crate) fn with_auth(request: RequestBuilder, api_key: Option<&SecretString>) -> RequestBuilder {
    match api_key {
        Some(key) if !key.expose_secret().is_empty() => {
            let token: &str = key.expose_secret().as_ref();
            request.bearer_auth(token)
        }
        _ => request,
    }
}

/// Short description of a transport failure, safe to surface to callers
pub(crate) fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else if err.is_body() || err.is_decode() {
        "failed to read response body".to_string()
    } else {
        "request failed".to_string()
    }
}
