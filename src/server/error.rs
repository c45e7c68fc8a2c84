//! Mapping of [`VeilError`] onto HTTP responses

use crate::domain::VeilError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Error message used for any stage failure
pub const PROCESSING_FAILED: &str = "Failed to process text";

/// Error message used for unusable request bodies
pub const INVALID_REQUEST: &str = "Invalid request";

/// JSON error body: `{ "error": ..., "details": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

/// Error returned by request handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, error: &str, details: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.to_string(),
                details: details.into(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<VeilError> for ApiError {
    fn from(err: VeilError) -> Self {
        match &err {
            VeilError::InvalidInput(_) => {
                Self::new(StatusCode::BAD_REQUEST, INVALID_REQUEST, err.details())
            }
            _ => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                PROCESSING_FAILED,
                err.details(),
            ),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            INVALID_REQUEST,
            format!("Failed to parse the request body as JSON: {err}"),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
