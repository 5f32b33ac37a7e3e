//! Application error type mapping to HTTP status codes.
//!
//! Only persistence failures surface as hard errors on the dispatch path;
//! configuration and backend failures never reach this type (they are folded
//! into fallback replies inside the core).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use mentor_types::error::RepositoryError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Persistence failure.
    Repository(RepositoryError),
    /// Request validation error.
    Validation(String),
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Repository(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_ERROR",
                e.to_string(),
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
