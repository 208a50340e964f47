//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::error::RepositoryError;

/// Structured alert payload returned with error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error key for programmatic handling (e.g. "idexists", "idnull")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Entity name or additional details
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
    /// Invalid request, carrying the entity name and an error key the client
    /// can dispatch on ("idexists", "idnull", "required", ...)
    BadRequest {
        message: String,
        entity: &'static str,
        key: &'static str,
    },
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, entity: &'static str, key: &'static str) -> Self {
        Self::BadRequest {
            message: message.into(),
            entity,
            key,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest {
                message,
                entity,
                key,
            } => (
                StatusCode::BAD_REQUEST,
                ApiError::new(key, message).with_details(entity),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => match e {
                RepositoryError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", e.to_string()))
                }
                RepositoryError::Validation { .. } => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("VALIDATION_ERROR", e.to_string()),
                ),
                other => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("REPOSITORY_ERROR", other.to_string()),
                ),
            },
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_not_found_maps_to_404() {
        let response =
            AppError::Repository(RepositoryError::not_found("no such row")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_carries_the_error_key() {
        let err = AppError::bad_request("id must be absent", "weekday", "idexists");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
