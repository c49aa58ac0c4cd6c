//! Plain text and JSON readers.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, Modality};
use crate::Extractor;
use async_trait::async_trait;

/// Extensions read as plain UTF-8 text.
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "csv", "html", "xml", "js", "css", "rtf", "log", "conf", "config", "ini",
    "yaml", "yml",
];

/// Reads raw bytes as UTF-8 text.
///
/// Decoding is strict: invalid sequences fail the read rather than being
/// replaced, so callers never see silently mangled content.
#[derive(Debug, Clone, Default)]
pub struct TextExtractor;

impl TextExtractor {
    /// Create a new text extractor.
    pub fn new() -> Self {
        Self
    }

    /// Decode bytes as UTF-8, stripping a leading byte order mark.
    pub fn decode(content: &[u8]) -> ExtractResult<String> {
        let content = content.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(content);
        std::str::from_utf8(content)
            .map(str::to_owned)
            .map_err(|e| ExtractError::InvalidUtf8(e.to_string()))
    }
}

#[async_trait]
impl Extractor for TextExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let text = Self::decode(content)?;
        Ok(ExtractedContent::new(text, Modality::Text).with_metadata("original_size", content.len()))
    }

    fn supported_extensions(&self) -> &[&str] {
        TEXT_EXTENSIONS
    }

    fn name(&self) -> &str {
        "utf8-text"
    }
}

/// Strict JSON reader.
///
/// The extracted text is the 2-space pretty form of the parsed document and
/// the parsed value is attached as structured data. Parse failures are errors.
#[derive(Debug, Clone, Default)]
pub struct JsonExtractor;

impl JsonExtractor {
    /// Create a new JSON extractor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for JsonExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let text = TextExtractor::decode(content)?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| ExtractError::Json(e.to_string()))?;
        let pretty =
            serde_json::to_string_pretty(&value).map_err(|e| ExtractError::Json(e.to_string()))?;

        Ok(ExtractedContent::new(pretty, Modality::Json)
            .with_structured(value)
            .with_metadata("original_size", content.len()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "serde-json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_extractor_reads_utf8() {
        let extractor = TextExtractor::new();
        let result = extractor.extract("línea uno\nline two".as_bytes()).await.unwrap();
        assert_eq!(result.text, "línea uno\nline two");
        assert_eq!(result.modality, Modality::Text);
    }

    #[tokio::test]
    async fn test_text_extractor_strips_bom() {
        let extractor = TextExtractor::new();
        let result = extractor.extract(b"\xEF\xBB\xBFhello").await.unwrap();
        assert_eq!(result.text, "hello");
    }

    #[tokio::test]
    async fn test_text_extractor_rejects_invalid_utf8() {
        let extractor = TextExtractor::new();
        let result = extractor.extract(&[0x66, 0x6F, 0xFF, 0xFE]).await;
        assert!(matches!(result, Err(ExtractError::InvalidUtf8(_))));
    }

    #[tokio::test]
    async fn test_json_extractor_pretty_prints() {
        let extractor = JsonExtractor::new();
        let result = extractor.extract(br#"{"a":1,"b":[true]}"#).await.unwrap();
        assert_eq!(result.text, "{\n  \"a\": 1,\n  \"b\": [\n    true\n  ]\n}");
        assert_eq!(result.structured, Some(serde_json::json!({"a": 1, "b": [true]})));
    }

    #[tokio::test]
    async fn test_json_extractor_rejects_invalid_json() {
        let extractor = JsonExtractor::new();
        let result = extractor.extract(b"{not json").await;
        assert!(matches!(result, Err(ExtractError::Json(_))));
    }

    #[test]
    fn test_supported_extensions() {
        assert!(TextExtractor::new().supports("csv"));
        assert!(!TextExtractor::new().supports("pdf"));
        assert!(JsonExtractor::new().supports("json"));
    }
}
