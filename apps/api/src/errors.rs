use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::analysis::models::ResultEnvelope;

pub const MISSING_FILE_MESSAGE: &str = "No file provided";
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Please upload a PDF file";
pub const FILE_TOO_LARGE_MESSAGE: &str = "File size must be less than 5MB";
pub const EMPTY_EXTRACTION_MESSAGE: &str =
    "Could not extract text from PDF. Please ensure the PDF contains readable text.";
pub const ANALYSIS_FALLBACK_MESSAGE: &str = "Failed to analyze resume. Please try again.";

/// Every way a resume analysis request can fail.
/// All variants are terminal for the request; none are retried.
///
/// Implements `IntoResponse` so handlers can return `Result<T, AnalysisError>`;
/// the body is always a failed `ResultEnvelope`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{}", MISSING_FILE_MESSAGE)]
    MissingFile,

    #[error("{}", UNSUPPORTED_TYPE_MESSAGE)]
    UnsupportedType { declared: String },

    #[error("{}", FILE_TOO_LARGE_MESSAGE)]
    FileTooLarge { size: Option<usize> },

    #[error("{}", EMPTY_EXTRACTION_MESSAGE)]
    EmptyExtraction,

    #[error("Analysis response did not match the expected format: {0}")]
    SchemaViolation(String),

    #[error("{}", unknown_failure_message(.0))]
    UnknownAnalysisFailure(String),
}

fn unknown_failure_message(message: &str) -> &str {
    if message.trim().is_empty() {
        ANALYSIS_FALLBACK_MESSAGE
    } else {
        message
    }
}

impl AnalysisError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::MissingFile => StatusCode::BAD_REQUEST,
            AnalysisError::UnsupportedType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AnalysisError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AnalysisError::EmptyExtraction => StatusCode::UNPROCESSABLE_ENTITY,
            AnalysisError::SchemaViolation(_) | AnalysisError::UnknownAnalysisFailure(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Stable machine-readable name, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::MissingFile => "MISSING_FILE",
            AnalysisError::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            AnalysisError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AnalysisError::EmptyExtraction => "EMPTY_EXTRACTION",
            AnalysisError::SchemaViolation(_) => "SCHEMA_VIOLATION",
            AnalysisError::UnknownAnalysisFailure(_) => "UNKNOWN_ANALYSIS_FAILURE",
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AnalysisError::SchemaViolation(detail) => {
                tracing::error!(code = self.code(), "Schema violation: {detail}");
            }
            AnalysisError::UnknownAnalysisFailure(msg) => {
                tracing::error!(code = self.code(), "Analysis failed: {msg}");
            }
            AnalysisError::UnsupportedType { declared } => {
                tracing::debug!(code = self.code(), "Rejected media type {declared:?}");
            }
            AnalysisError::FileTooLarge { size } => {
                tracing::debug!(code = self.code(), "Rejected upload of {size:?} bytes");
            }
            other => {
                tracing::debug!(code = other.code(), "Request rejected: {other}");
            }
        }

        let body = Json(ResultEnvelope::failure(self.to_string()));
        (status, body).into_response()
    }
}
