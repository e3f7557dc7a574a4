use crate::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use thiserror::Error;

pub const MISSING_TEXT: &str = "Missing text";
pub const NOT_CONFIGURED: &str = "Server not configured";
pub const UNEXPECTED: &str = "Unexpected error";

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Missing text")]
    MissingText,

    #[error("Server not configured")]
    NotConfigured,

    #[error("Upstream responded with status {status}")]
    Upstream { status: StatusCode, payload: Value },

    #[error("Upstream request failed: {source}")]
    UpstreamFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("Invalid JSON payload: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl RelayError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingText => StatusCode::BAD_REQUEST,
            RelayError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Upstream { status, .. } => *status,
            RelayError::UpstreamFailed { .. }
            | RelayError::InvalidJson { .. }
            | RelayError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body returned to the caller. Only upstream payloads pass through;
    /// every other internal detail collapses to a fixed message.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            RelayError::MissingText => ErrorResponse::new(MISSING_TEXT),
            RelayError::NotConfigured => ErrorResponse::new(NOT_CONFIGURED),
            RelayError::Upstream { payload, .. } => ErrorResponse::passthrough(payload.clone()),
            RelayError::UpstreamFailed { .. }
            | RelayError::InvalidJson { .. }
            | RelayError::Internal { .. } => ErrorResponse::new(UNEXPECTED),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            RelayError::MissingText => tracing::debug!("Rejected request: {}", self),
            RelayError::NotConfigured => {
                tracing::error!("Upstream credential is not configured (status: {})", status)
            }
            RelayError::Upstream { .. } => tracing::warn!("Relay error: {}", self),
            _ => tracing::error!("Relay error: {} (status: {})", self, status),
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
