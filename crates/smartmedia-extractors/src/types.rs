//! Core types for content extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Modality of the extracted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Plain UTF-8 text.
    Text,
    /// JSON document.
    Json,
    /// PDF document.
    Pdf,
}

impl Default for Modality {
    fn default() -> Self {
        Modality::Text
    }
}

/// Page structure for paginated documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Total page count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Per-page text, in page order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub pages: Vec<String>,
}

/// Extracted content with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted text.
    pub text: String,

    /// Modality the text was extracted from.
    pub modality: Modality,

    /// Parsed value for structured formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured: Option<serde_json::Value>,

    /// Page structure (if preserved).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<DocumentStructure>,

    /// Additional metadata (format-specific).
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedContent {
    /// Create new extracted content.
    pub fn new(text: String, modality: Modality) -> Self {
        Self {
            text,
            modality,
            structured: None,
            structure: None,
            metadata: HashMap::new(),
        }
    }

    /// Attach the parsed value.
    pub fn with_structured(mut self, value: serde_json::Value) -> Self {
        self.structured = Some(value);
        self
    }

    /// Add structure information.
    pub fn with_structure(mut self, structure: DocumentStructure) -> Self {
        self.structure = Some(structure);
        self
    }

    /// Add metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get content length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_content_builders() {
        let content = ExtractedContent::new("héllo".to_string(), Modality::Text)
            .with_metadata("original_size", 6)
            .with_structured(serde_json::json!({"a": 1}));

        assert_eq!(content.len(), 5);
        assert!(!content.is_empty());
        assert_eq!(content.metadata.get("original_size"), Some(&serde_json::json!(6)));
        assert!(content.structured.is_some());
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let content = ExtractedContent::new("  \n\t".to_string(), Modality::Text);
        assert!(content.is_empty());
    }
}
