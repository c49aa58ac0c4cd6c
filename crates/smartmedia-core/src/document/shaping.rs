//! Display shaping of extracted document text.

use serde_json::Value;

/// CSV files longer than this are cut for display.
pub const CSV_PREVIEW_LINES: usize = 50;

/// Display form of a document plus any structure recovered on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedContent {
    pub display: String,
    /// Parsed JSON, when the content was JSON and parsed.
    pub structured: Option<Value>,
}

/// Shape content for display by extension.
///
/// JSON is pretty-printed with 2-space indentation when it parses and left
/// untouched when it does not. CSV beyond [`CSV_PREVIEW_LINES`] lines is cut
/// with a trailing note. Everything else passes through.
pub fn shape(content: &str, extension: &str) -> ShapedContent {
    match extension {
        "json" => match serde_json::from_str::<Value>(content) {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(pretty) => ShapedContent {
                    display: pretty,
                    structured: Some(value),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "JSON re-serialization failed, showing raw content");
                    passthrough(content)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "JSON parse failed, showing raw content");
                passthrough(content)
            }
        },
        "csv" => ShapedContent {
            display: truncate_csv(content),
            structured: None,
        },
        _ => passthrough(content),
    }
}

/// Display text only.
pub fn shape_content(content: &str, extension: &str) -> String {
    shape(content, extension).display
}

fn passthrough(content: &str) -> ShapedContent {
    ShapedContent {
        display: content.to_string(),
        structured: None,
    }
}

fn truncate_csv(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() <= CSV_PREVIEW_LINES {
        return content.to_string();
    }
    format!(
        "{}\n\n... (file has {} lines, showing first {})",
        lines[..CSV_PREVIEW_LINES].join("\n"),
        lines.len(),
        CSV_PREVIEW_LINES
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_pretty_print_preserves_content() {
        let input = r#"{"name":"Ada","tags":["x","y"],"nested":{"n":1}}"#;
        let shaped = shape(input, "json");

        assert!(shaped.display.contains("\n  \"name\": \"Ada\""));
        let reparsed: Value = serde_json::from_str(&shaped.display).unwrap();
        let original: Value = serde_json::from_str(input).unwrap();
        assert_eq!(reparsed, original);
        assert_eq!(shaped.structured, Some(original));
    }

    #[test]
    fn test_json_keeps_key_order() {
        let shaped = shape_content(r#"{"z":1,"a":2}"#, "json");
        assert!(shaped.find("\"z\"").unwrap() < shaped.find("\"a\"").unwrap());
    }

    #[test]
    fn test_invalid_json_passes_through() {
        let input = "{\"unterminated\": ";
        let shaped = shape(input, "json");
        assert_eq!(shaped.display, input);
        assert!(shaped.structured.is_none());
    }

    #[test]
    fn test_csv_truncated_past_fifty_lines() {
        let input: Vec<String> = (1..=120).map(|i| format!("{},value", i)).collect();
        let shaped = shape_content(&input.join("\n"), "csv");

        let (body, note) = shaped.split_once("\n\n").unwrap();
        assert_eq!(body.lines().count(), 50);
        assert!(body.ends_with("50,value"));
        assert_eq!(note, "... (file has 120 lines, showing first 50)");
    }

    #[test]
    fn test_short_csv_unchanged() {
        let input: Vec<String> = (1..=10).map(|i| format!("{},v", i)).collect();
        let input = input.join("\n");
        assert_eq!(shape_content(&input, "csv"), input);
    }

    #[test]
    fn test_csv_at_exactly_fifty_lines_unchanged() {
        let input: Vec<String> = (1..=50).map(|i| i.to_string()).collect();
        let input = input.join("\n");
        assert_eq!(shape_content(&input, "csv"), input);
    }

    #[test]
    fn test_other_extensions_pass_through() {
        let input = "  # Title\n\n{not json}  ";
        assert_eq!(shape_content(input, "md"), input);
        assert_eq!(shape_content(input, ""), input);
    }
}
