//! Response contract for the analysis call.
//!
//! `analysis_schema()` is the JSON Schema handed to the model; `AnalysisResult`
//! is what we deserialize into. `validate_analysis` enforces the parts serde
//! cannot: non-empty lists and non-blank text.

use serde_json::{json, Value};

use crate::analysis::models::AnalysisResult;

pub fn analysis_schema() -> Value {
    let text_list = |description: &str| {
        json!({
            "type": "array",
            "description": description,
            "items": { "type": "string" },
            "minItems": 1
        })
    };

    json!({
        "type": "object",
        "properties": {
            "strengths": text_list("List of key strengths identified in the resume (3-5 items)"),
            "weaknesses": text_list("List of areas for improvement (3-5 items)"),
            "courseSuggestions": {
                "type": "array",
                "description": "Recommended courses to enhance skills (3-5 courses)",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "reason": { "type": "string" },
                        "platform": { "type": "string" }
                    },
                    "required": ["title", "reason"]
                }
            },
            "internshipSuggestions": {
                "type": "array",
                "description": "Best fit internship opportunities (3-5 suggestions)",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "properties": {
                        "role": { "type": "string" },
                        "industry": { "type": "string" },
                        "reason": { "type": "string" },
                        "requiredSkills": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["role", "industry", "reason", "requiredSkills"]
                }
            },
            "overallSummary": {
                "type": "string",
                "description": "A brief overall summary of the candidate profile"
            }
        },
        "required": [
            "strengths",
            "weaknesses",
            "courseSuggestions",
            "internshipSuggestions",
            "overallSummary"
        ]
    })
}

/// Rejects results that deserialized but break the content invariants.
/// Returns a description of the first problem found.
pub fn validate_analysis(result: &AnalysisResult) -> Result<(), String> {
    require_items("strengths", &result.strengths)?;
    require_items("weaknesses", &result.weaknesses)?;

    if result.course_suggestions.is_empty() {
        return Err("courseSuggestions must not be empty".to_string());
    }
    for (i, course) in result.course_suggestions.iter().enumerate() {
        require_text(&format!("courseSuggestions[{i}].title"), &course.title)?;
        require_text(&format!("courseSuggestions[{i}].reason"), &course.reason)?;
    }

    if result.internship_suggestions.is_empty() {
        return Err("internshipSuggestions must not be empty".to_string());
    }
    for (i, internship) in result.internship_suggestions.iter().enumerate() {
        let field = |name: &str| format!("internshipSuggestions[{i}].{name}");
        require_text(&field("role"), &internship.role)?;
        require_text(&field("industry"), &internship.industry)?;
        require_text(&field("reason"), &internship.reason)?;
    }

    require_text("overallSummary", &result.overall_summary)
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is blank"));
    }
    Ok(())
}

fn require_items(field: &str, items: &[String]) -> Result<(), String> {
    if items.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if let Some(i) = items.iter().position(|s| s.trim().is_empty()) {
        return Err(format!("{field}[{i}] is blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::fixtures::sample_analysis;

    #[test]
    fn test_schema_required_fields_match_serialized_result() {
        let schema = analysis_schema();
        let serialized = serde_json::to_value(sample_analysis()).unwrap();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        assert_eq!(required.len(), 5);
        for field in &required {
            assert!(serialized.get(*field).is_some(), "schema field {field} not in type");
            assert!(schema["properties"].get(*field).is_some());
        }
        assert_eq!(serialized.as_object().unwrap().len(), required.len());
    }

    #[test]
    fn test_schema_nested_fields_match_serialized_result() {
        let schema = analysis_schema();
        let serialized = serde_json::to_value(sample_analysis()).unwrap();
        let internship_props = &schema["properties"]["internshipSuggestions"]["items"]["properties"];
        for key in serialized["internshipSuggestions"][0].as_object().unwrap().keys() {
            assert!(internship_props.get(key).is_some(), "unknown key {key}");
        }
        let course_props = &schema["properties"]["courseSuggestions"]["items"]["properties"];
        for key in serialized["courseSuggestions"][0].as_object().unwrap().keys() {
            assert!(course_props.get(key).is_some(), "unknown key {key}");
        }
    }

    #[test]
    fn test_valid_result_passes() {
        assert!(validate_analysis(&sample_analysis()).is_ok());
    }

    #[test]
    fn test_empty_strengths_rejected() {
        let mut result = sample_analysis();
        result.strengths.clear();
        let err = validate_analysis(&result).unwrap_err();
        assert!(err.contains("strengths"));
    }

    #[test]
    fn test_blank_weakness_rejected() {
        let mut result = sample_analysis();
        result.weaknesses.push("  ".to_string());
        assert!(validate_analysis(&result).unwrap_err().contains("weaknesses[3]"));
    }

    #[test]
    fn test_empty_internships_rejected() {
        let mut result = sample_analysis();
        result.internship_suggestions.clear();
        assert!(validate_analysis(&result)
            .unwrap_err()
            .contains("internshipSuggestions"));
    }

    #[test]
    fn test_blank_course_reason_rejected() {
        let mut result = sample_analysis();
        result.course_suggestions[1].reason = String::new();
        assert_eq!(
            validate_analysis(&result).unwrap_err(),
            "courseSuggestions[1].reason is blank"
        );
    }

    #[test]
    fn test_blank_internship_industry_rejected() {
        let mut result = sample_analysis();
        result.internship_suggestions[0].industry = " ".to_string();
        assert_eq!(
            validate_analysis(&result).unwrap_err(),
            "internshipSuggestions[0].industry is blank"
        );
    }

    #[test]
    fn test_blank_internship_reason_rejected() {
        let mut result = sample_analysis();
        result.internship_suggestions[0].reason = "\t".to_string();
        assert_eq!(
            validate_analysis(&result).unwrap_err(),
            "internshipSuggestions[0].reason is blank"
        );
    }

    #[test]
    fn test_blank_summary_rejected() {
        let mut result = sample_analysis();
        result.overall_summary = "\n".to_string();
        assert!(validate_analysis(&result).is_err());
    }
}
