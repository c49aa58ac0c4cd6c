//! Heuristic document summaries.
//!
//! This is keyword and counting heuristics, not a model call. Summaries say
//! so in their first line.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{MediaError, MediaResult};

const PREVIEW_CHARS: usize = 200;
const SUMMARY_HEADER: &str = "Heuristic summary (not a model analysis)";

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date pattern is valid")
});

/// Produces a summary for document content.
pub trait DocumentAnalyzer: Send + Sync {
    fn analyze(&self, content: &str, extension: &str) -> MediaResult<String>;
}

/// Format a count with comma thousands separators.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Language implied by a file extension.
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    Some(match extension {
        "js" => "JavaScript",
        "ts" => "TypeScript",
        "py" => "Python",
        "java" => "Java",
        "cpp" => "C++",
        "c" => "C",
        "cs" => "C#",
        "php" => "PHP",
        "rb" => "Ruby",
        "go" => "Go",
        "rs" => "Rust",
        "html" => "HTML",
        "css" => "CSS",
        "xml" => "XML",
        "yaml" | "yml" => "YAML",
        _ => return None,
    })
}

/// Language guessed from keywords, case-insensitively.
pub fn guess_language(content: &str) -> Option<&'static str> {
    let lower = content.to_lowercase();
    if lower.contains("function") && lower.contains("var") {
        Some("JavaScript")
    } else if lower.contains("def ") && lower.contains("import") {
        Some("Python")
    } else if lower.contains("public class") {
        Some("Java")
    } else {
        None
    }
}

/// Rough description of what the text is. Keyword scans ignore case.
pub fn content_type_hint(content: &str) -> &'static str {
    let lower = content.to_lowercase();
    if lower.contains("function") || lower.contains("class") || lower.contains("import") {
        "code"
    } else if lower.contains("http") || lower.contains("www.") {
        "document with links"
    } else if DATE_PATTERN.is_match(content) {
        "document with dates"
    } else if lower.contains("error") || lower.contains("exception") {
        "error log"
    } else {
        "plain text"
    }
}

fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &content[..idx]),
        None => content.to_string(),
    }
}

fn counts_section(content: &str, extension: &str) -> Vec<String> {
    let file_type = if extension.is_empty() {
        "UNKNOWN".to_string()
    } else {
        extension.to_uppercase()
    };
    vec![
        SUMMARY_HEADER.to_string(),
        format!("File type: {}", file_type),
        format!("Characters: {}", format_count(content.chars().count())),
        format!("Words: {}", format_count(content.split_whitespace().count())),
        format!("Lines: {}", format_count(content.split('\n').count())),
    ]
}

fn json_structure(content: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(serde_json::Value::Object(map)) => {
            format!("Structure: object with {} root keys", format_count(map.len()))
        }
        Ok(serde_json::Value::Array(items)) => {
            format!("Structure: array with {} items", format_count(items.len()))
        }
        Ok(_) => "Structure: scalar value".to_string(),
        Err(_) => "Structure: invalid JSON".to_string(),
    }
}

/// Counts, structure and keyword heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl DocumentAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, content: &str, extension: &str) -> MediaResult<String> {
        if content.trim().is_empty() {
            return Ok("Document is empty".to_string());
        }

        let mut lines = counts_section(content, extension);

        match extension {
            "json" => lines.push(json_structure(content)),
            "pdf" => {
                lines.push("Text extraction: succeeded".to_string());
                lines.push(format!("Content type: {}", content_type_hint(content)));
            }
            _ => {
                lines.push(format!("Content type: {}", content_type_hint(content)));
                if let Some(language) =
                    language_for_extension(extension).or_else(|| guess_language(content))
                {
                    lines.push(format!("Language: {}", language));
                }
            }
        }

        lines.push(format!("Preview: {}", preview(content)));
        Ok(lines.join("\n"))
    }
}

/// Best-effort wrapper around a [`DocumentAnalyzer`].
#[derive(Clone)]
pub struct Analyzer {
    inner: Arc<dyn DocumentAnalyzer>,
}

impl Analyzer {
    /// Wrap an analyzer implementation.
    pub fn new(inner: Arc<dyn DocumentAnalyzer>) -> Self {
        Self { inner }
    }

    /// Run the analyzer, reporting failures as [`MediaError::AnalysisFailure`].
    pub fn try_summarize(&self, content: &str, extension: &str) -> MediaResult<String> {
        self.inner.analyze(content, extension).map_err(|e| match e {
            MediaError::AnalysisFailure(_) => e,
            other => MediaError::AnalysisFailure(other.to_string()),
        })
    }

    /// Summary that never fails; degrades to counts only.
    pub fn summarize(&self, content: &str, extension: &str) -> String {
        match self.try_summarize(content, extension) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "Document analysis degraded to counts");
                Self::partial_summary(content, extension)
            }
        }
    }

    /// Counts-only summary.
    pub fn partial_summary(content: &str, extension: &str) -> String {
        counts_section(content, extension).join("\n")
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Arc::new(HeuristicAnalyzer))
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl DocumentAnalyzer for Failing {
        fn analyze(&self, _content: &str, _extension: &str) -> MediaResult<String> {
            Err(MediaError::Internal("model offline".to_string()))
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_empty_document() {
        let analyzer = Analyzer::default();
        assert_eq!(analyzer.summarize("  \n ", "txt"), "Document is empty");
    }

    #[test]
    fn test_counts() {
        let summary = Analyzer::default().summarize("one two\nthree", "txt");
        assert!(summary.starts_with(SUMMARY_HEADER));
        assert!(summary.contains("File type: TXT"));
        assert!(summary.contains("Characters: 13"));
        assert!(summary.contains("Words: 3"));
        assert!(summary.contains("Lines: 2"));
    }

    #[test]
    fn test_json_structure() {
        let analyzer = Analyzer::default();
        assert!(analyzer
            .summarize(r#"{"a": 1, "b": 2}"#, "json")
            .contains("object with 2 root keys"));
        assert!(analyzer
            .summarize("[1, 2, 3]", "json")
            .contains("array with 3 items"));
        assert!(analyzer
            .summarize("{broken", "json")
            .contains("invalid JSON"));
    }

    #[test]
    fn test_content_type_hint() {
        assert_eq!(content_type_hint("import os"), "code");
        assert_eq!(content_type_hint("see https://example.com"), "document with links");
        assert_eq!(content_type_hint("released 2024-01-31"), "document with dates");
        assert_eq!(content_type_hint("NullPointerException at line 3"), "error log");
        assert_eq!(content_type_hint("just words"), "plain text");
    }

    #[test]
    fn test_keyword_scans_ignore_case() {
        assert_eq!(content_type_hint("Import Notes"), "code");
        assert_eq!(content_type_hint("See HTTP://X.COM"), "document with links");
        assert_eq!(content_type_hint("FATAL ERROR in module"), "error log");
        assert_eq!(guess_language("Function Var"), Some("JavaScript"));
        assert_eq!(guess_language("DEF main\nIMPORT sys"), Some("Python"));
        assert_eq!(guess_language("Public Class Foo"), Some("Java"));
        assert_eq!(guess_language("Plain prose"), None);
    }

    #[test]
    fn test_language_detection() {
        let analyzer = Analyzer::default();
        assert!(analyzer.summarize("fn main() {}", "rs").contains("Language: Rust"));
        assert!(analyzer
            .summarize("import sys\ndef main(): pass", "txt")
            .contains("Language: Python"));
        assert!(analyzer
            .summarize("var x = 1; function f() {}", "log")
            .contains("Language: JavaScript"));
        assert!(!analyzer.summarize("hello world", "txt").contains("Language"));
    }

    #[test]
    fn test_pdf_branch() {
        let summary = Analyzer::default().summarize("Quarterly report", "pdf");
        assert!(summary.contains("Text extraction: succeeded"));
        assert!(summary.contains("Content type: plain text"));
    }

    #[test]
    fn test_preview_is_bounded() {
        let content = "a".repeat(500);
        let summary = Analyzer::default().summarize(&content, "txt");
        let preview_line = summary.lines().last().unwrap();
        assert_eq!(preview_line, format!("Preview: {}...", "a".repeat(200)));
    }

    #[test]
    fn test_failing_analyzer_degrades() {
        let analyzer = Analyzer::new(Arc::new(Failing));
        assert!(matches!(
            analyzer.try_summarize("text", "txt"),
            Err(MediaError::AnalysisFailure(_))
        ));

        let summary = analyzer.summarize("text here", "txt");
        assert!(summary.contains("Words: 2"));
        assert!(!summary.contains("Preview"));
    }
}
