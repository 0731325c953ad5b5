//! Error handling for the AgroLens risk service
//!
//! Caller errors carry field-level detail; upstream and internal failures
//! are logged with their specifics and surfaced with generic messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Caller errors
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },

    // External data provider errors
    #[error("Upstream {provider} data unavailable: {detail}")]
    UpstreamData { provider: String, detail: String },

    // Internal integration faults
    #[error("Feature contract violation: {0}")]
    FeatureContract(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn upstream(source: impl Into<String>, detail: impl Into<String>) -> Self {
        AppError::UpstreamData {
            provider: source.into(),
            detail: detail.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidInput { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_INPUT".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::UpstreamData { .. } => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "UPSTREAM_UNAVAILABLE".to_string(),
                    message: "Required upstream data is temporarily unavailable".to_string(),
                    field: None,
                },
            ),
            AppError::FeatureContract(_)
            | AppError::ModelUnavailable(_)
            | AppError::Configuration(_)
            | AppError::Internal(_)
            | AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Specifics stay in the logs; the response body never carries them
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
