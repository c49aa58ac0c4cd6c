//! Transform results and the boundary outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::FileKind;
use crate::error::MediaError;

/// A re-encoded, stored image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Reference returned by the binary store. Opaque to the pipeline.
    pub url: String,
    pub original_name: String,
    /// `{unique_id}.jpg`
    pub produced_name: String,
    pub original_size_bytes: u64,
    /// Base64 length × 0.75. An approximation, not the exact JPEG size.
    pub estimated_produced_size_bytes: u64,
    pub source_media_type: String,
    /// Width after resizing.
    pub width: u32,
    /// Height after resizing.
    pub height: u32,
    pub optimized: bool,
    pub timestamp: DateTime<Utc>,
}

/// How a document's bytes are read.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentSubtype {
    Pdf,
    Json,
    #[default]
    Text,
}

impl DocumentSubtype {
    /// Subtype implied by a lowercased extension.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "pdf" => Self::Pdf,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Text read from a document, shaped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Content after shaping (pretty JSON, truncated CSV, ...).
    pub display_content: String,
    /// Full content as read.
    pub raw_content: String,
    pub source_extension: String,
    pub document_subtype: DocumentSubtype,
    pub source_media_type: String,
    pub original_size_bytes: u64,
    /// Character count of `display_content`.
    pub content_length: usize,
    pub timestamp: DateTime<Utc>,
    /// Parsed value for JSON documents that parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<serde_json::Value>,
    /// Heuristic summary, when analysis ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_summary: Option<String>,
    /// Why analysis did not produce a summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
    pub delivered_to_chat: bool,
}

/// Output of a successful transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "lowercase")]
pub enum TransformResult {
    Image(ImageResult),
    Document(DocumentResult),
}

impl TransformResult {
    /// Kind of file that produced this result.
    pub fn kind(&self) -> FileKind {
        match self {
            Self::Image(_) => FileKind::Image,
            Self::Document(_) => FileKind::Document,
        }
    }

    /// The image result, if this is one.
    pub fn as_image(&self) -> Option<&ImageResult> {
        match self {
            Self::Image(image) => Some(image),
            Self::Document(_) => None,
        }
    }

    /// The document result, if this is one.
    pub fn as_document(&self) -> Option<&DocumentResult> {
        match self {
            Self::Document(doc) => Some(doc),
            Self::Image(_) => None,
        }
    }
}

/// Discriminated result returned by every public entry point.
///
/// Callers branch on `success` instead of handling errors.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub success: bool,
    pub file_name: String,
    pub file_size: u64,
    pub kind: FileKind,
    pub processed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: Option<TransformResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl ProcessOutcome {
    /// Successful outcome wrapping `result`.
    pub fn succeeded(file_name: impl Into<String>, file_size: u64, result: TransformResult) -> Self {
        Self {
            success: true,
            file_name: file_name.into(),
            file_size,
            kind: result.kind(),
            processed_at: Utc::now(),
            result: Some(result),
            error: None,
            error_code: None,
        }
    }

    /// Failed outcome. The message always names the file.
    pub fn failed(
        file_name: impl Into<String>,
        file_size: u64,
        kind: FileKind,
        error: &MediaError,
    ) -> Self {
        let file_name = file_name.into();
        let label = if file_name.is_empty() {
            "<unnamed>"
        } else {
            file_name.as_str()
        };
        let message = format!("Failed to process {}: {}", label, error);
        Self {
            success: false,
            file_name,
            file_size,
            kind,
            processed_at: Utc::now(),
            result: None,
            error: Some(message),
            error_code: Some(error.code().as_str().to_string()),
        }
    }

    /// Convert back into a `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<TransformResult, String> {
        match (self.success, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(self
                .error
                .unwrap_or_else(|| format!("Failed to process {}", self.file_name))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> DocumentResult {
        DocumentResult {
            display_content: "hi".to_string(),
            raw_content: "hi".to_string(),
            source_extension: "txt".to_string(),
            document_subtype: DocumentSubtype::Text,
            source_media_type: "text/plain".to_string(),
            original_size_bytes: 2,
            content_length: 2,
            timestamp: Utc::now(),
            structured_data: None,
            analysis_summary: None,
            analysis_error: None,
            delivered_to_chat: false,
        }
    }

    #[test]
    fn test_subtype_from_extension() {
        assert_eq!(DocumentSubtype::from_extension("pdf"), DocumentSubtype::Pdf);
        assert_eq!(DocumentSubtype::from_extension("json"), DocumentSubtype::Json);
        assert_eq!(DocumentSubtype::from_extension("csv"), DocumentSubtype::Text);
    }

    #[test]
    fn test_success_outcome_serializes_flat() {
        let outcome = ProcessOutcome::succeeded(
            "a.txt",
            2,
            TransformResult::Document(sample_document()),
        );
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["kind"], "document");
        assert_eq!(value["content_type"], "document");
        assert_eq!(value["display_content"], "hi");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failed_outcome_mentions_file() {
        let err = MediaError::unsupported("unknown type", "blob.xyz", "");
        let outcome = ProcessOutcome::failed("blob.xyz", 10, FileKind::Unknown, &err);

        assert!(!outcome.success);
        assert!(outcome.error.as_deref().unwrap().contains("blob.xyz"));
        assert_eq!(outcome.error_code.as_deref(), Some("VAL_003"));
        assert!(outcome.into_result().is_err());
    }
}
