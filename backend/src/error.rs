//! Application error handling
//!
//! Domain errors from `fittrack-shared`, storage failures and auth failures
//! all end up here and are rendered as `{ "error": { code, message, unit? } }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fittrack_shared::{DomainError, ErrorDetail, ErrorResponse};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Workout {unit} is malformed: {message}")]
    MalformedInput { unit: usize, message: String },

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Storage unavailable")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MalformedInput { unit, reason } => ApiError::MalformedInput {
                unit,
                message: reason,
            },
            DomainError::InvalidMeasurement(msg) => ApiError::InvalidMeasurement(msg),
            DomainError::InvalidGoal(msg) => ApiError::InvalidGoal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut unit = None;
        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::MalformedInput { unit: u, .. } => {
                unit = Some(*u);
                (StatusCode::BAD_REQUEST, "MALFORMED_INPUT", self.to_string())
            }
            ApiError::InvalidMeasurement(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_MEASUREMENT", msg.clone())
            }
            ApiError::InvalidGoal(msg) => (StatusCode::BAD_REQUEST, "INVALID_GOAL", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
            }
            ApiError::StorageUnavailable(err) => {
                error!("Storage error: {:?}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORAGE_UNAVAILABLE",
                    "Storage is temporarily unavailable".to_string(),
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                unit,
                field: None,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
