//! PDF text extraction — pluggable, trait-based.
//!
//! Default: `PdfTextExtractor` (pdf-extract, in-process, no network).
//! Alternative: `ModelTextExtractor` (sends the PDF to the LLM as a document
//! block and asks for a transcription). Chosen once at startup via
//! `EXTRACTION_STRATEGY`.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::analysis::prompts::{EXTRACTION_INSTRUCTION, EXTRACTION_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unreadable PDF: {0}")]
    Unreadable(String),

    #[error("PDF parser crashed: {0}")]
    ParserPanicked(String),

    #[error("model transcription failed: {0}")]
    Model(#[from] LlmError),
}

/// Converts raw PDF bytes to plain text.
///
/// Returning `Ok("")` is allowed (e.g. a scanned PDF with no text layer);
/// the caller decides what empty means.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, pdf_bytes: Bytes) -> Result<String, ExtractionError>;
}

/// In-process extraction with `pdf-extract`. Parsing runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, pdf_bytes: Bytes) -> Result<String, ExtractionError> {
        let size = pdf_bytes.len();
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&pdf_bytes)
                .map_err(|e| ExtractionError::Unreadable(e.to_string()))
        })
        .await
        .map_err(|e| ExtractionError::ParserPanicked(e.to_string()))??;

        debug!("pdf-extract produced {} chars from {} bytes", text.len(), size);
        Ok(text)
    }
}

/// Multimodal extraction: the LLM reads the PDF and transcribes it.
pub struct ModelTextExtractor {
    llm: LlmClient,
}

impl ModelTextExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextExtractor for ModelTextExtractor {
    async fn extract_text(&self, pdf_bytes: Bytes) -> Result<String, ExtractionError> {
        let text = self
            .llm
            .call_with_document(&pdf_bytes, EXTRACTION_INSTRUCTION, EXTRACTION_SYSTEM)
            .await;

        transcription_outcome(text)
    }
}

fn transcription_outcome(text: Result<String, LlmError>) -> Result<String, ExtractionError> {
    match text {
        Ok(text) => Ok(text),
        // A model that says nothing found nothing to transcribe.
        Err(LlmError::EmptyContent) => Ok(String::new()),
        Err(e) => Err(ExtractionError::Model(e)),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionStrategy {
    #[default]
    Library,
    Model,
}

impl FromStr for ExtractionStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "library" | "pdf-extract" => Ok(ExtractionStrategy::Library),
            "model" | "llm" => Ok(ExtractionStrategy::Model),
            other => anyhow::bail!(
                "Unknown EXTRACTION_STRATEGY '{other}' (expected 'library' or 'model')"
            ),
        }
    }
}

pub fn build_extractor(strategy: ExtractionStrategy, llm: &LlmClient) -> Arc<dyn TextExtractor> {
    match strategy {
        ExtractionStrategy::Library => Arc::new(PdfTextExtractor),
        ExtractionStrategy::Model => Arc::new(ModelTextExtractor::new(llm.clone())),
    }
}
