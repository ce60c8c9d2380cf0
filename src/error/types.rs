//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::schemas::analyze::AnalysisResult;

/// Message returned when the request carries no usable prompt
pub const PROMPT_REQUIRED_MESSAGE: &str = "Prompt is required";

/// Message returned for every upstream failure; provider detail stays in the logs
pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to process AI request";

/// Coarse classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    UpstreamFailure,
    TransportFailure,
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// The prompt was absent or empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider answered, but with a non-2xx status or an undecodable body
    #[error("Upstream failure: {message}")]
    UpstreamFailure {
        status: Option<u16>,
        message: String,
    },

    /// The provider could not be reached or missed the deadline
    #[error("Transport failure: {0}")]
    TransportFailure(String),
}

impl ApiError {
    pub fn prompt_required() -> Self {
        ApiError::Validation(PROMPT_REQUIRED_MESSAGE.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::UpstreamFailure { .. } => ErrorKind::UpstreamFailure,
            ApiError::TransportFailure(_) => ErrorKind::TransportFailure,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::UpstreamFailure | ErrorKind::TransportFailure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Caller-facing message. Only validation errors carry their own text.
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::Validation(msg) => msg,
            ApiError::UpstreamFailure { .. } | ApiError::TransportFailure(_) => {
                INTERNAL_ERROR_MESSAGE
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(kind = ?self.kind(), error = %self, "Server error calling Gemini");
        }

        let body = Json(AnalysisResult::failure(self.public_message()));

        (status, body).into_response()
    }
}
