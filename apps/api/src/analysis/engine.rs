//! Analysis Engine — one structured-generation call per resume.

use async_trait::async_trait;
use tracing::info;

use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::{
    ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM, ANALYSIS_TOOL_DESCRIPTION, ANALYSIS_TOOL_NAME,
};
use crate::analysis::schema::{analysis_schema, validate_analysis};
use crate::errors::AnalysisError;
use crate::llm_client::prompts::{fill_template, TOOL_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError, ToolSpec};

/// Turns resume text into a validated `AnalysisResult`.
///
/// Carried in `ResumeAnalyzer` as `Arc<dyn AnalysisEngine>`.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    async fn generate_analysis(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisError>;
}

pub struct LlmAnalysisEngine {
    llm: LlmClient,
    tool: ToolSpec,
    system: String,
}

impl LlmAnalysisEngine {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            tool: ToolSpec {
                name: ANALYSIS_TOOL_NAME.to_string(),
                description: ANALYSIS_TOOL_DESCRIPTION.to_string(),
                input_schema: analysis_schema(),
            },
            system: format!("{ANALYSIS_SYSTEM} {TOOL_ONLY_SYSTEM}"),
        }
    }
}

#[async_trait]
impl AnalysisEngine for LlmAnalysisEngine {
    async fn generate_analysis(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let prompt = fill_template(ANALYSIS_PROMPT_TEMPLATE, &[("resume_text", resume_text)]);

        let result: AnalysisResult = self
            .llm
            .call_structured(&prompt, &self.system, &self.tool)
            .await
            .map_err(map_llm_error)?;

        validate_analysis(&result).map_err(AnalysisError::SchemaViolation)?;

        info!(
            "Analysis generated: {} strengths, {} weaknesses, {} courses, {} internships",
            result.strengths.len(),
            result.weaknesses.len(),
            result.course_suggestions.len(),
            result.internship_suggestions.len()
        );
        Ok(result)
    }
}

/// Shape problems are schema violations; everything else is surfaced as-is.
pub(crate) fn map_llm_error(err: LlmError) -> AnalysisError {
    match err {
        LlmError::Parse(e) => AnalysisError::SchemaViolation(e.to_string()),
        e @ LlmError::MissingToolOutput(_) => AnalysisError::SchemaViolation(e.to_string()),
        e @ LlmError::EmptyContent => AnalysisError::SchemaViolation(e.to_string()),
        other => AnalysisError::UnknownAnalysisFailure(other.to_string()),
    }
}
