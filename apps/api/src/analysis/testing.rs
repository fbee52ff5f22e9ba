//! In-process fakes for the two external services, with call counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::analysis::engine::AnalysisEngine;
use crate::analysis::extractor::{ExtractionError, TextExtractor};
use crate::analysis::models::fixtures::sample_analysis;
use crate::analysis::models::AnalysisResult;
use crate::errors::AnalysisError;
use crate::llm_client::LlmError;

enum ExtractOutcome {
    Text(&'static str),
    Fail,
    ServiceDown,
}

pub struct FakeExtractor {
    outcome: ExtractOutcome,
    calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn returning(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            outcome: ExtractOutcome::Text(text),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: ExtractOutcome::Fail,
            calls: AtomicUsize::new(0),
        })
    }

    /// Fails the way an unreachable transcription service does.
    pub fn service_failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: ExtractOutcome::ServiceDown,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for FakeExtractor {
    async fn extract_text(&self, _pdf_bytes: Bytes) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            ExtractOutcome::Text(t) => Ok(t.to_string()),
            ExtractOutcome::Fail => Err(ExtractionError::Unreadable("bad xref".into())),
            ExtractOutcome::ServiceDown => Err(ExtractionError::Model(LlmError::Api {
                status: 401,
                message: "invalid x-api-key".into(),
            })),
        }
    }
}

pub enum EngineOutcome {
    Valid,
    SchemaViolation,
    ServiceDown,
}

pub struct FakeEngine {
    outcome: EngineOutcome,
    /// Every resume text the engine was called with, in order.
    pub seen: Mutex<Vec<String>>,
}

impl FakeEngine {
    pub fn new(outcome: EngineOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl AnalysisEngine for FakeEngine {
    async fn generate_analysis(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisError> {
        self.seen.lock().unwrap().push(resume_text.to_string());
        match self.outcome {
            EngineOutcome::Valid => Ok(sample_analysis()),
            EngineOutcome::SchemaViolation => Err(AnalysisError::SchemaViolation(
                "strengths must not be empty".into(),
            )),
            EngineOutcome::ServiceDown => Err(AnalysisError::UnknownAnalysisFailure(
                "HTTP error: operation timed out".into(),
            )),
        }
    }
}
