use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::email::MailError;
use crate::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every response body has the shape `{ "error": ..., "details"?: ... }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Send error: {0}")]
    SendFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_)
            | AppError::Validation(_)
            | AppError::UnsupportedFileType(_)
            | AppError::PayloadTooLarge { .. } => StatusCode::BAD_REQUEST,
            AppError::Extraction(_)
            | AppError::Summarization(_)
            | AppError::SendFailed(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed or mistyped JSON bodies become a 400 with the usual `{error}` shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Summarization(e.to_string())
    }
}

impl From<MailError> for AppError {
    fn from(e: MailError) -> Self {
        AppError::SendFailed(e.to_string())
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Unsupported(ext) => AppError::UnsupportedFileType(ext),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, details): (String, Option<String>) = match &self {
            AppError::MissingInput(msg) | AppError::Validation(msg) => (msg.clone(), None),
            AppError::UnsupportedFileType(_) => ("Unsupported file type".to_string(), None),
            AppError::PayloadTooLarge { limit } => (
                format!("File too large (limit is {} MiB)", limit / (1024 * 1024)),
                None,
            ),
            AppError::Extraction(detail) => {
                tracing::error!("Extraction error: {detail}");
                ("Failed to extract text".to_string(), Some(detail.clone()))
            }
            AppError::Summarization(detail) => {
                tracing::error!("Summarization error: {detail}");
                ("Failed to generate summary".to_string(), Some(detail.clone()))
            }
            AppError::SendFailed(detail) => {
                tracing::error!("Email send error: {detail}");
                ("Failed to send email".to_string(), Some(detail.clone()))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                ("An internal server error occurred".to_string(), None)
            }
        };

        let body = match details {
            Some(details) => json!({ "error": error, "details": details }),
            None => json!({ "error": error }),
        };

        (status, Json(body)).into_response()
    }
}
