//! Error types for the Book API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::repository::StoreError;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Map a failed lookup: missing records are 404, malformed ids 400,
    /// anything else stays a store failure.
    pub fn from_lookup(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::NotFound,
            StoreError::InvalidId(raw) => {
                AppError::InvalidRequest(format!("invalid book id: {}", raw))
            }
            other => AppError::Store(other),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// User-level status message
    pub status: String,
    /// Application-specific error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Low-level error text, for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    fn new(status: &str, error: Option<String>) -> Self {
        Self {
            status: status.to_string(),
            code: None,
            error,
        }
    }

    pub fn invalid_request(err: impl ToString) -> Self {
        Self::new("Invalid Request.", Some(err.to_string()))
    }

    pub fn render(err: impl ToString) -> Self {
        Self::new("Error rendering response.", Some(err.to_string()))
    }

    pub fn not_found() -> Self {
        Self::new("Resource not found.", None)
    }

    pub fn internal_server() -> Self {
        Self::new("Internal server error.", None)
    }
}

impl AppError {
    /// Status and a freshly built body for this error
    pub fn to_parts(&self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::invalid_request(msg))
            }
            AppError::Render(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorResponse::render(msg))
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::not_found()),
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal_server())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal_server())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The status is part of the response head, fixed before the body is written.
        let (status, body) = self.to_parts();
        (status, Json(body)).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
