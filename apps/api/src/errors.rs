use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::roadmap::normalizer::SchemaError;

/// Message returned whenever the completion backend was never configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "Groq API key is missing or invalid.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: No JSON data provided")]
    BadRequest,

    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    #[error("Error communicating with Groq API: {0}")]
    Upstream(#[from] LlmError),

    #[error("Failed to parse Groq API response: Invalid JSON. Details: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Error communicating with Groq API: {0}")]
    Schema(#[from] SchemaError),
}

impl AppError {
    pub fn not_configured() -> Self {
        AppError::NotConfigured(NOT_CONFIGURED_MESSAGE.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest => {
                tracing::warn!("Rejected request: {self}");
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::NotConfigured(_) => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
            AppError::Upstream(_) | AppError::InvalidJson(_) | AppError::Schema(_) => {
                tracing::error!("Error processing request: {self:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "An internal server error occurred",
                        "details": self.to_string()
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
