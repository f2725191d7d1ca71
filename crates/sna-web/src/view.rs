//! Page rendering
//!
//! The whole page is rebuilt on every request from a `PageView`.
//!
//! Author: hephaex@gmail.com

use sna_core::{is_blank, AnalysisReport, QaAnswer};
use std::fmt::Write;

const TITLE: &str = "📰 Smart News Analyze App";
const DESCRIPTION: &str =
    "This app performs classification, summarization, QA, and NER on news articles.";

/// Everything shown on one render of the page
#[derive(Debug, Clone, Default)]
pub struct PageView {
    /// Article text echoed back into the textarea
    pub article: String,
    /// Question echoed back into the input
    pub question: String,
    /// Blank-input warning from Analyze, shown under the Analyze button
    pub analyze_warning: Option<String>,
    /// Blank-input warning from Get Answer, shown in the question area
    pub answer_warning: Option<String>,
    /// Result of the Analyze action
    pub report: Option<AnalysisReport>,
    /// Result of the Get Answer action
    pub answer: Option<QaAnswer>,
}

impl PageView {
    pub fn new(article: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            article: article.into(),
            question: question.into(),
            ..Default::default()
        }
    }

    /// The question form only exists once there is article text
    pub fn shows_question(&self) -> bool {
        !is_blank(&self.article)
    }

    /// Render the full HTML document
    pub fn render(&self) -> String {
        let mut body = String::new();

        let _ = write!(
            body,
            r#"<h1>{TITLE}</h1>
<p>{DESCRIPTION}</p>
<form method="post" action="/">
<label for="article">Paste a news article here:</label>
<textarea id="article" name="article" rows="10">{}</textarea>
<button type="submit" name="action" value="analyze">Analyze</button>
"#,
            escape_html(&self.article)
        );

        if let Some(warning) = &self.analyze_warning {
            body.push_str(&render_warning(warning));
        }

        if let Some(report) = &self.report {
            body.push_str(&render_report(report));
        }

        body.push_str("<h2>❓ Ask Question</h2>\n");
        if self.shows_question() {
            let _ = write!(
                body,
                r#"<label for="question">Ask a question about the article:</label>
<input type="text" id="question" name="question" value="{}">
<button type="submit" name="action" value="answer">Get Answer</button>
"#,
                escape_html(&self.question)
            );
        }
        body.push_str("</form>\n");

        if let Some(warning) = &self.answer_warning {
            body.push_str(&render_warning(warning));
        }

        if let Some(answer) = &self.answer {
            let _ = writeln!(body, r#"<p class="answer">{}</p>"#, escape_html(&answer.to_string()));
        }

        document(TITLE, &body)
    }
}

fn render_warning(warning: &str) -> String {
    format!(
        "<div class=\"warning\" role=\"alert\">{}</div>\n",
        escape_html(warning)
    )
}

fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::from("<section class=\"results\">\n");

    let _ = writeln!(
        out,
        "<h3>Classification</h3>\n<p class=\"category\">{}</p>",
        escape_html(&report.classification.to_string())
    );

    if let Some(summary) = &report.summary {
        let _ = writeln!(
            out,
            "<h3>Summarization</h3>\n<p class=\"summary\">{}</p>",
            escape_html(&summary.text)
        );
    }

    out.push_str("<h3>Named Entity Recognition (NER)</h3>\n<ul class=\"entities\">\n");
    for entity in &report.entities {
        let _ = writeln!(out, "<li>{}</li>", escape_html(&entity.to_string()));
    }
    out.push_str("</ul>\n</section>\n");

    out
}

/// Error page shown when a facility fails
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>{TITLE}</h1>\n<div class=\"error\" role=\"alert\">{}</div>\n<p><a href=\"/\">Back</a></p>\n",
        escape_html(message)
    );
    document("Error", &body)
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{}</title>
<link rel="stylesheet" href="/assets/style.css">
</head>
<body>
<main>
{body}</main>
</body>
</html>
"#,
        escape_html(title)
    )
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sna_core::{Category, ClassificationResult, EntityAnnotation, SummaryResult};

    fn report(summary: Option<&str>) -> AnalysisReport {
        AnalysisReport {
            classification: ClassificationResult {
                category: Category::Business,
                label_index: 2,
            },
            summary: summary.map(|text| SummaryResult {
                text: text.to_string(),
            }),
            entities: vec![EntityAnnotation {
                word: "Apple".to_string(),
                entity_group: "ORG".to_string(),
                score: 0.991,
                start: None,
                end: None,
            }],
            processing_time_ms: 3,
        }
    }

    #[test]
    fn test_empty_page() {
        let html = PageView::default().render();
        assert!(html.contains("Smart News Analyze App"));
        assert!(html.contains(r#"value="analyze""#));
        assert!(html.contains("Ask Question"));
        assert!(!html.contains(r#"name="question""#));
    }

    #[test]
    fn test_question_shown_with_article() {
        let html = PageView::new("Some article", "").render();
        assert!(html.contains(r#"name="question""#));
        assert!(html.contains("Get Answer"));
    }

    #[test]
    fn test_report_sections() {
        let mut view = PageView::new("Apple shares rose", "");
        view.report = Some(report(None));
        let html = view.render();

        assert!(html.contains("Predicted Category: Business"));
        assert!(!html.contains("Summarization"));
        assert!(html.contains("<li>Apple → ORG (score=0.99)</li>"));

        view.report = Some(report(Some("Shares rose.")));
        assert!(view.render().contains("<h3>Summarization</h3>"));
    }

    #[test]
    fn test_analyze_warning_sits_under_analyze_button() {
        let mut view = PageView::new("", "");
        view.analyze_warning = Some("Please enter some text to analyze.".to_string());
        let html = view.render();

        let button = html.find(r#"value="analyze""#).unwrap();
        let warning = html.find("Please enter some text to analyze.").unwrap();
        let heading = html.find("Ask Question").unwrap();
        assert!(button < warning && warning < heading);
    }

    #[test]
    fn test_answer_warning_sits_in_question_area() {
        let mut view = PageView::new("Some article", " ");
        view.answer_warning = Some("Please enter a question about the article.".to_string());
        let html = view.render();

        let get_answer = html.find("Get Answer").unwrap();
        let warning = html.find("Please enter a question").unwrap();
        assert!(get_answer < warning);
    }

    #[test]
    fn test_input_is_escaped() {
        let view = PageView::new("<script>alert('x')</script>", "\"quoted\"");
        let html = view.render();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("&quot;quoted&quot;"));
    }
}
