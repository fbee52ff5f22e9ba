// Resume analysis LLM prompt templates.
// All prompts for the analysis module are defined here.

pub const ANALYSIS_SYSTEM: &str = "\
You are an expert career advisor and resume analyzer. \
Your feedback is specific, constructive, and actionable. \
Ground every point in the resume content you are given.";

pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and provide detailed insights.

Resume Content:
{resume_text}

Provide a comprehensive analysis including:
1. Key strengths and positive aspects of the candidate's profile (3-5 items)
2. Areas for improvement or weaknesses that could be addressed (3-5 items)
3. Specific course recommendations that would enhance their skills (3-5 courses; include course titles, reasons, and suggested platforms like Coursera, Udemy, etc.)
4. Best fit internship opportunities based on their background (3-5 suggestions; include role titles, industries, reasons for fit, and required skills)
5. An overall summary of the candidate's profile

Be specific, constructive, and actionable in your feedback."#;

/// Name of the tool the model must call with its analysis.
pub const ANALYSIS_TOOL_NAME: &str = "record_resume_analysis";

pub const ANALYSIS_TOOL_DESCRIPTION: &str =
    "Record the structured resume analysis: strengths, weaknesses, course suggestions, \
     internship suggestions, and an overall summary.";

pub const EXTRACTION_SYSTEM: &str = "\
You are a precise document transcriber. \
Reproduce the document's text faithfully. Do not summarize or add commentary. \
If the document contains no readable text, reply with an empty message.";

pub const EXTRACTION_INSTRUCTION: &str = "Extract all text content from this resume PDF. \
Provide the complete text in a structured format.";
