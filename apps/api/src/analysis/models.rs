use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// A file received from the upload form. Lives for one request only.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    /// Media type as declared by the client, not sniffed.
    pub media_type: String,
    pub file_name: Option<String>,
}

impl UploadedDocument {
    pub fn new(bytes: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSuggestion {
    pub title: String,
    pub reason: String,
    /// e.g. Coursera, Udemy, edX
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipSuggestion {
    pub role: String,
    pub industry: String,
    pub reason: String,
    pub required_skills: Vec<String>,
}

/// Structured output of one analysis call. Wire names are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub course_suggestions: Vec<CourseSuggestion>,
    pub internship_suggestions: Vec<InternshipSuggestion>,
    pub overall_summary: String,
}

/// Uniform wrapper returned to the UI for every request.
/// `data` is set iff `success`; `error` is set iff not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultEnvelope {
    pub fn success(data: AnalysisResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl From<Result<AnalysisResult, AnalysisError>> for ResultEnvelope {
    fn from(outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        match outcome {
            Ok(data) => ResultEnvelope::success(data),
            Err(e) => ResultEnvelope::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sample_analysis() -> AnalysisResult {
        AnalysisResult {
            strengths: vec![
                "Strong Rust and systems background".to_string(),
                "Shipped two production services".to_string(),
                "Clear, quantified project bullets".to_string(),
            ],
            weaknesses: vec![
                "No cloud deployment experience listed".to_string(),
                "Summary section is generic".to_string(),
                "Missing links to public code".to_string(),
            ],
            course_suggestions: vec![
                CourseSuggestion {
                    title: "AWS Cloud Practitioner Essentials".to_string(),
                    reason: "Fills the cloud deployment gap".to_string(),
                    platform: Some("Coursera".to_string()),
                },
                CourseSuggestion {
                    title: "Distributed Systems".to_string(),
                    reason: "Builds on existing backend work".to_string(),
                    platform: None,
                },
            ],
            internship_suggestions: vec![InternshipSuggestion {
                role: "Backend Engineering Intern".to_string(),
                industry: "Fintech".to_string(),
                reason: "Matches service and database experience".to_string(),
                required_skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            }],
            overall_summary: "A systems-focused student with solid project work.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_analysis;
    use super::*;

    #[test]
    fn test_analysis_serializes_with_camel_case_fields() {
        let value = serde_json::to_value(sample_analysis()).unwrap();
        for field in [
            "strengths",
            "weaknesses",
            "courseSuggestions",
            "internshipSuggestions",
            "overallSummary",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert!(value["internshipSuggestions"][0]
            .get("requiredSkills")
            .is_some());
    }

    #[test]
    fn test_course_without_platform_omits_field() {
        let value = serde_json::to_value(sample_analysis()).unwrap();
        assert!(value["courseSuggestions"][1].get("platform").is_none());
        assert_eq!(value["courseSuggestions"][0]["platform"], "Coursera");
    }

    #[test]
    fn test_success_envelope_omits_error() {
        let json = serde_json::to_value(ResultEnvelope::success(sample_analysis())).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_some());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let json = serde_json::to_value(ResultEnvelope::failure("No file provided")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "No file provided" })
        );
    }

    #[test]
    fn test_envelope_from_error_uses_display_message() {
        let outcome: Result<AnalysisResult, AnalysisError> = Err(AnalysisError::MissingFile);
        let envelope = ResultEnvelope::from(outcome);
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("No file provided"));
    }
}
