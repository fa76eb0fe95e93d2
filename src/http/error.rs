//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::api::FieldError;
use crate::db::repository::RepositoryError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found; rendered as a bare 404 with no body.
    NotFound,
    /// Malformed request (unparseable path/query parameter or body).
    BadRequest(String),
    /// Payload failed field validation; carries the failed fields.
    Validation(Vec<FieldError>),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("BAD_REQUEST", msg)),
            )
                .into_response(),
            AppError::Validation(fields) => {
                let details = serde_json::to_value(&fields).unwrap_or_default();
                (
                    StatusCode::BAD_REQUEST,
                    Json(
                        ApiError::new("VALIDATION_FAILED", "Request body failed validation")
                            .with_details(details),
                    ),
                )
                    .into_response()
            }
            AppError::Repository(e) if e.is_not_found() => {
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Repository(RepositoryError::ValidationError { message, .. }) => (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("VALIDATION_FAILED", message)),
            )
                .into_response(),
            AppError::Repository(e) => {
                // Store failures are terminal for the request; no retries here.
                error!("Repository error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiError::new("REPOSITORY_ERROR", e.to_string())),
                )
                    .into_response()
            }
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}
