//! Error types for Bookshelf server

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        missing: Vec<&'static str>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Required fields were absent or blank
    pub fn missing_fields(missing: Vec<&'static str>) -> Self {
        AppError::Validation {
            message: format!("Missing required fields: {}", missing.join(", ")),
            missing,
        }
    }

    pub fn book_not_found(id: i64) -> Self {
        AppError::NotFound(format!("Book {} not found", id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => ErrorResponse::new(msg),
            AppError::Validation { message, missing } => ErrorResponse {
                error: message,
                details: Some(serde_json::json!(missing)),
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ErrorResponse {
                    error: "Database error".to_string(),
                    details: Some(serde_json::Value::String(e.to_string())),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::NotFound("Resource not found".to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
