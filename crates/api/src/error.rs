use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sociallens_core::error::CoreError;
use sociallens_langflow::insight::InsightError;

/// Application-level error type for JSON API handlers.
///
/// Wraps [`CoreError`] for domain errors and [`InsightError`] for flow
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sociallens_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to the hosted insight flow.
    #[error(transparent)]
    Insight(#[from] InsightError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::UnknownOption { .. } => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", core.to_string())
                }
            },

            // --- Insight flow errors ---
            AppError::Insight(err) => match err {
                InsightError::Config(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIGURATION_ERROR",
                    err.to_string(),
                ),
                InsightError::Api(_) => {
                    (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
                }
                InsightError::EmptyResponse => {
                    (StatusCode::BAD_GATEWAY, "EMPTY_RESPONSE", err.to_string())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
