//! HTTP error handling and response types.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// The statistics endpoint could not be reached or answered badly
    Upstream(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("UPSTREAM_ERROR", "statistics endpoint unavailable")
                    .with_details(msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        (status, Json(error)).into_response()
    }
}

impl From<GraphError> for AppError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::InvalidTooltipLabel { .. } | GraphError::InvalidRange(_) => {
                AppError::BadRequest(err.to_string())
            }
            GraphError::Fetch(e) => AppError::Upstream(e.to_string()),
            GraphError::Config(msg) => AppError::Internal(msg),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
