//! Chat message payload for document uploads.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Longest display excerpt placed in a chat message, in characters.
pub const MAX_CHAT_CONTENT_CHARS: usize = 2000;

const TRUNCATION_MARKER: &str = "\n\n...(content truncated, full content preserved)";

/// Extra fields attached to a document upload message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatExtra {
    #[serde(rename = "type")]
    pub kind: String,
    pub file_name: String,
    pub document_type: String,
    pub processed_by: String,
}

/// A user message carrying document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author: String,
    pub is_user: bool,
    pub is_system: bool,
    pub sent_at: DateTime<Utc>,
    pub body_markdown: String,
    pub extra: ChatExtra,
    /// Untruncated display content.
    pub full_content: String,
}

impl ChatMessage {
    /// Build the upload message for a shaped document.
    pub fn document_upload(file_name: &str, extension: &str, display_content: &str) -> Self {
        let excerpt = truncate_for_chat(display_content);
        let body_markdown = format!(
            "{} **Document content** ({})\n\n```{}\n{}\n```",
            document_icon(extension),
            file_name,
            extension,
            excerpt
        );

        Self {
            author: "User".to_string(),
            is_user: true,
            is_system: false,
            sent_at: Utc::now(),
            body_markdown,
            extra: ChatExtra {
                kind: "document_upload".to_string(),
                file_name: file_name.to_string(),
                document_type: extension.to_string(),
                processed_by: "smart_media_assistant".to_string(),
            },
            full_content: display_content.to_string(),
        }
    }

    /// Single-line form used by messengers that take plain text.
    pub fn inline_record(&self) -> String {
        let local = self.sent_at.with_timezone(&Local);
        format!(
            "[user message|document|{}|{}|{}|{}]",
            self.extra.file_name,
            self.extra.document_type,
            self.full_content,
            local.format("%H:%M")
        )
    }
}

/// Cap content at [`MAX_CHAT_CONTENT_CHARS`], appending a marker when cut.
pub fn truncate_for_chat(content: &str) -> String {
    match content.char_indices().nth(MAX_CHAT_CONTENT_CHARS) {
        Some((idx, _)) => format!("{}{}", &content[..idx], TRUNCATION_MARKER),
        None => content.to_string(),
    }
}

/// Icon shown in front of a document message.
pub fn document_icon(extension: &str) -> &'static str {
    match extension {
        "json" => "📋",
        "txt" => "📄",
        "md" => "📝",
        "html" => "🌐",
        "xml" => "📄",
        "csv" => "📊",
        "js" => "⚡",
        "css" => "🎨",
        "yaml" | "yml" => "⚙️",
        "log" => "📜",
        "pdf" => "📕",
        _ => "📄",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_upload_body() {
        let msg = ChatMessage::document_upload("data.json", "json", "{\n  \"a\": 1\n}");

        assert_eq!(
            msg.body_markdown,
            "📋 **Document content** (data.json)\n\n```json\n{\n  \"a\": 1\n}\n```"
        );
        assert!(msg.is_user);
        assert!(!msg.is_system);
        assert_eq!(msg.extra.kind, "document_upload");
        assert_eq!(msg.extra.processed_by, "smart_media_assistant");
    }

    #[test]
    fn test_truncate_for_chat() {
        let short = "x".repeat(MAX_CHAT_CONTENT_CHARS);
        assert_eq!(truncate_for_chat(&short), short);

        let long = "é".repeat(MAX_CHAT_CONTENT_CHARS + 1);
        let cut = truncate_for_chat(&long);
        assert!(cut.ends_with("(content truncated, full content preserved)"));
        assert_eq!(
            cut.chars().count(),
            MAX_CHAT_CONTENT_CHARS + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn test_long_content_preserved_in_full() {
        let long = "y".repeat(5000);
        let msg = ChatMessage::document_upload("big.txt", "txt", &long);
        assert_eq!(msg.full_content.len(), 5000);
        assert!(msg.body_markdown.contains("content truncated"));
    }

    #[test]
    fn test_inline_record() {
        let msg = ChatMessage::document_upload("a.csv", "csv", "x,y");
        let record = msg.inline_record();
        assert!(record.starts_with("[user message|document|a.csv|csv|x,y|"));
        assert!(record.ends_with(']'));
    }

    #[test]
    fn test_serialized_extra_type_key() {
        let msg = ChatMessage::document_upload("a.md", "md", "# hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["extra"]["type"], "document_upload");
        assert!(value["sent_at"].as_str().unwrap().contains('T'));
    }
}
