// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment for calls answered through a forced tool call.
pub const TOOL_ONLY_SYSTEM: &str = "\
    You MUST answer by calling the provided tool exactly once. \
    Every required field must be filled. \
    Do NOT leave any list empty. \
    Do NOT include any text outside the tool call.";

/// Substitutes `{key}` placeholders in a prompt template.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_all_occurrences() {
        let out = fill_template("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and x then y");
    }

    #[test]
    fn test_fill_template_leaves_unknown_placeholders() {
        assert_eq!(fill_template("{missing}", &[("a", "x")]), "{missing}");
    }
}
