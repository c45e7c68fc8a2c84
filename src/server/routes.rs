//! Request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::domain::{AnonymizeRequest, AnonymizeResult, RequestId};
use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Header used to correlate a request with its log records
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/api/analyze", post(analyze))
        .route("/health", get(health))
}

/// POST /analyze and /api/analyze: anonymize one piece of text.
///
/// The body is decoded as JSON whatever its `Content-Type`.
async fn analyze(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<AnonymizeResult>, ApiError> {
    let request: AnonymizeRequest = serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!(request_id = %request_id, error = %err, "Undecodable request body");
        ApiError::from(err)
    })?;

    let result = state
        .orchestrator
        .anonymize_with_id(&request, request_id)
        .await?;

    Ok(Json(result))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health: liveness only, upstream services are not contacted.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Attach a [`RequestId`] to the request and echo it on the response
///
/// A well-formed inbound `x-request-id` is reused, otherwise a fresh one is
/// generated.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| RequestId::new(value).ok())
        .unwrap_or_else(RequestId::generate);

    request.extensions_mut().insert(id.clone());
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
