//! Server-rendered upload form and result view.
//!
//! The page is a pure function of the envelope the request produced: no
//! envelope or a failed one shows the form, a successful one shows the
//! analysis sections.

use html_escape::encode_text;

use crate::analysis::models::{AnalysisResult, CourseSuggestion, InternshipSuggestion, ResultEnvelope};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Resume Analyzer</title>
</head>
<body>
<main>
<h1>Resume Analyzer</h1>
"#;

const PAGE_TAIL: &str = "</main>\n</body>\n</html>\n";

pub fn render_page(envelope: Option<&ResultEnvelope>) -> String {
    let mut html = String::from(PAGE_HEAD);

    match envelope {
        Some(ResultEnvelope {
            success: true,
            data: Some(analysis),
            ..
        }) => render_analysis(&mut html, analysis),
        Some(envelope) => {
            let message = envelope
                .error
                .as_deref()
                .unwrap_or(crate::errors::ANALYSIS_FALLBACK_MESSAGE);
            render_form(&mut html, Some(message));
        }
        None => render_form(&mut html, None),
    }

    html.push_str(PAGE_TAIL);
    html
}

fn render_form(html: &mut String, error: Option<&str>) {
    html.push_str("<p>Upload your resume (PDF, max 5MB) for an AI-powered review.</p>\n");
    if let Some(error) = error {
        html.push_str(&format!(
            "<div class=\"error\" role=\"alert\"><strong>Analysis failed</strong><p>{}</p></div>\n",
            encode_text(error)
        ));
    }
    html.push_str(
        r#"<form method="post" action="/" enctype="multipart/form-data">
<input type="file" name="resume" accept="application/pdf" required>
<button type="submit">Analyze Resume</button>
</form>
"#,
    );
}

fn render_analysis(html: &mut String, analysis: &AnalysisResult) {
    html.push_str("<section class=\"summary\">\n<h2>Overall Summary</h2>\n");
    html.push_str(&format!("<p>{}</p>\n</section>\n", encode_text(&analysis.overall_summary)));

    render_list(html, "strengths", "Strengths", &analysis.strengths);
    render_list(html, "weaknesses", "Areas for Improvement", &analysis.weaknesses);

    html.push_str("<section class=\"courses\">\n<h2>Recommended Courses</h2>\n");
    for course in &analysis.course_suggestions {
        render_course(html, course);
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"internships\">\n<h2>Internship Opportunities</h2>\n");
    for internship in &analysis.internship_suggestions {
        render_internship(html, internship);
    }
    html.push_str("</section>\n");

    html.push_str("<p><a href=\"/\">Analyze another resume</a></p>\n");
}

fn render_list(html: &mut String, class: &str, heading: &str, items: &[String]) {
    html.push_str(&format!("<section class=\"{class}\">\n<h2>{heading}</h2>\n<ul>\n"));
    for item in items {
        html.push_str(&format!("<li>{}</li>\n", encode_text(item)));
    }
    html.push_str("</ul>\n</section>\n");
}

fn render_course(html: &mut String, course: &CourseSuggestion) {
    html.push_str(&format!(
        "<article class=\"course\">\n<h3>{}</h3>\n",
        encode_text(&course.title)
    ));
    if let Some(platform) = &course.platform {
        html.push_str(&format!(
            "<span class=\"badge\">{}</span>\n",
            encode_text(platform)
        ));
    }
    html.push_str(&format!("<p>{}</p>\n</article>\n", encode_text(&course.reason)));
}

fn render_internship(html: &mut String, internship: &InternshipSuggestion) {
    html.push_str(&format!(
        "<article class=\"internship\">\n<h3>{}</h3>\n<p class=\"industry\">{}</p>\n<p>{}</p>\n",
        encode_text(&internship.role),
        encode_text(&internship.industry),
        encode_text(&internship.reason)
    ));
    if !internship.required_skills.is_empty() {
        html.push_str("<ul class=\"skills\">\n");
        for skill in &internship.required_skills {
            html.push_str(&format!("<li>{}</li>\n", encode_text(skill)));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</article>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::fixtures::sample_analysis;

    #[test]
    fn test_initial_page_shows_form_only() {
        let html = render_page(None);
        assert!(html.contains("<form method=\"post\""));
        assert!(html.contains("name=\"resume\""));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("Strengths"));
    }

    #[test]
    fn test_failure_shows_form_with_error_verbatim() {
        let envelope = ResultEnvelope::failure("Please upload a PDF file");
        let html = render_page(Some(&envelope));
        assert!(html.contains("<form"));
        assert!(html.contains("<p>Please upload a PDF file</p>"));
    }

    #[test]
    fn test_success_shows_all_sections() {
        let envelope = ResultEnvelope::success(sample_analysis());
        let html = render_page(Some(&envelope));
        assert!(!html.contains("<form"));
        for heading in [
            "Overall Summary",
            "Strengths",
            "Areas for Improvement",
            "Recommended Courses",
            "Internship Opportunities",
        ] {
            assert!(html.contains(heading), "missing {heading}");
        }
        assert!(html.contains("<span class=\"badge\">Coursera</span>"));
        assert!(html.contains("<li>PostgreSQL</li>"));
        assert!(html.contains("href=\"/\""));
    }

    #[test]
    fn test_course_without_platform_has_no_badge() {
        let mut analysis = sample_analysis();
        analysis.course_suggestions.truncate(1);
        analysis.course_suggestions[0].platform = None;
        let html = render_page(Some(&ResultEnvelope::success(analysis)));
        assert!(!html.contains("class=\"badge\""));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let mut analysis = sample_analysis();
        analysis.strengths[0] = "<script>alert(1)</script> & more".to_string();
        let html = render_page(Some(&ResultEnvelope::success(analysis)));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn test_error_text_is_escaped() {
        let envelope = ResultEnvelope::failure("bad <b>input</b>");
        let html = render_page(Some(&envelope));
        assert!(html.contains("bad &lt;b&gt;input&lt;/b&gt;"));
    }
}
