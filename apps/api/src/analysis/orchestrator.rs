//! Resume analysis — validates the upload and drives the two external calls.
//!
//! Flow: validate (presence → media type → size) → extract text →
//!       reject blank text → generate analysis → wrap in envelope.
//!
//! Extraction and generation are strictly sequential; nothing is retried.

use std::sync::Arc;

use tracing::{info, warn};

use crate::analysis::engine::AnalysisEngine;
use crate::analysis::extractor::{ExtractionError, TextExtractor};
use crate::analysis::models::{AnalysisResult, ResultEnvelope, UploadedDocument};
use crate::errors::AnalysisError;

/// Largest accepted document: 5 MiB.
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Holds no per-request state; safe to share across concurrent requests.
#[derive(Clone)]
pub struct ResumeAnalyzer {
    extractor: Arc<dyn TextExtractor>,
    engine: Arc<dyn AnalysisEngine>,
}

impl ResumeAnalyzer {
    pub fn new(extractor: Arc<dyn TextExtractor>, engine: Arc<dyn AnalysisEngine>) -> Self {
        Self { extractor, engine }
    }

    /// Runs one analysis and folds the outcome into a `ResultEnvelope`.
    pub async fn analyze(&self, document: Option<UploadedDocument>) -> ResultEnvelope {
        self.run(document).await.into()
    }

    /// Same as `analyze`, but keeps the typed error for callers that need it
    /// (e.g. to pick an HTTP status).
    pub async fn run(
        &self,
        document: Option<UploadedDocument>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let document = validate_document(document)?;
        info!(
            "Analyzing resume {:?} ({} bytes)",
            document.file_name.as_deref().unwrap_or("<unnamed>"),
            document.len()
        );

        let text = self
            .extractor
            .extract_text(document.bytes)
            .await
            .map_err(map_extraction_error)?;

        if text.trim().is_empty() {
            warn!("Extraction produced no text");
            return Err(AnalysisError::EmptyExtraction);
        }

        info!("Extracted {} chars of resume text", text.chars().count());
        self.engine.generate_analysis(&text).await
    }
}

/// Unreadable documents become `EmptyExtraction`; transcription service
/// failures keep their own message.
fn map_extraction_error(err: ExtractionError) -> AnalysisError {
    match err {
        ExtractionError::Model(e) => {
            warn!("Transcription service failed: {e}");
            AnalysisError::UnknownAnalysisFailure(e.to_string())
        }
        other => {
            warn!("Text extraction failed: {other}");
            AnalysisError::EmptyExtraction
        }
    }
}

/// Presence, then declared type, then size. No external calls.
pub fn validate_document(
    document: Option<UploadedDocument>,
) -> Result<UploadedDocument, AnalysisError> {
    let document = document.ok_or(AnalysisError::MissingFile)?;

    if !is_pdf_media_type(&document.media_type) {
        return Err(AnalysisError::UnsupportedType {
            declared: document.media_type.clone(),
        });
    }

    if document.len() > MAX_DOCUMENT_BYTES {
        return Err(AnalysisError::FileTooLarge {
            size: Some(document.len()),
        });
    }

    Ok(document)
}

/// Compares the MIME essence only: `Application/PDF; name=x` is still a PDF.
fn is_pdf_media_type(media_type: &str) -> bool {
    media_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MEDIA_TYPE))
        .unwrap_or(false)
}
