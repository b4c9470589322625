//! # HTTP API Errors
//!
//! Maps record store failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::storage::StoreError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Create collided with an existing email
    #[error("Email already exists")]
    DuplicateEmail,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// The document could not be read, decoded or written
    #[error("{0}")]
    Storage(&'static str),

    /// The blocking task running the operation failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Convert a store failure, using `failure` as the message for storage errors
    pub fn from_store(err: StoreError, failure: &'static str) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => ApiError::DuplicateEmail,
            StoreError::Storage(source) => {
                tracing::error!(error = %source, "{}", failure);
                ApiError::Storage(failure)
            }
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DuplicateEmail => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::DuplicateEmail => "DUPLICATE_EMAIL",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: &'static str,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
            code: err.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
