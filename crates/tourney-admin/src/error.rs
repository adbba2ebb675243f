//! Error types for the registration admin module

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for admin operations
pub type AdminResult<T> = Result<T, AdminError>;

/// Admin module error types
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Invalid status: {0} (must be pending, approved, or rejected)")]
    InvalidStatus(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration not found")]
    RegistrationNotFound,

    #[error("{0}")]
    Store(String),

    #[error("Failed to save settings: {0}")]
    SettingsSave(String),
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AdminError {
    /// Convert to API error code
    pub fn code(&self) -> &'static str {
        match self {
            AdminError::InvalidStatus(_) => "INVALID_STATUS",
            AdminError::Validation(_) => "VALIDATION_ERROR",
            AdminError::InvalidCredentials => "INVALID_CREDENTIALS",
            AdminError::RegistrationNotFound => "REGISTRATION_NOT_FOUND",
            AdminError::Store(_) => "STORE_ERROR",
            AdminError::SettingsSave(_) => "SETTINGS_SAVE_ERROR",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::InvalidStatus(_) | AdminError::Validation(_) => StatusCode::BAD_REQUEST,

            AdminError::InvalidCredentials => StatusCode::UNAUTHORIZED,

            AdminError::RegistrationNotFound => StatusCode::NOT_FOUND,

            AdminError::Store(_) | AdminError::SettingsSave(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiError {
            code: self.code().to_string(),
            message: self.to_string(),
            details: None,
        };

        (status, axum::Json(body)).into_response()
    }
}
