//! Chat surfaces available to the command-line host.

use std::path::PathBuf;

use async_trait::async_trait;
use smartmedia_core::{ChatMessage, ChatSurface, MediaResult};
use tokio::io::AsyncWriteExt;

/// Appends each message as one JSON line to a transcript file.
pub struct TranscriptSurface {
    path: PathBuf,
}

impl TranscriptSurface {
    /// Surface appending to the transcript at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ChatSurface for TranscriptSurface {
    fn name(&self) -> &str {
        "transcript"
    }

    async fn deliver(&self, message: &ChatMessage) -> MediaResult<bool> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                return Ok(false);
            }
        }

        let mut line = serde_json::to_string(message)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(true)
    }
}

/// Writes the single-line record to stderr.
pub struct StderrSurface;

#[async_trait]
impl ChatSurface for StderrSurface {
    fn name(&self) -> &str {
        "stderr"
    }

    async fn deliver(&self, message: &ChatMessage) -> MediaResult<bool> {
        eprintln!("{}", message.inline_record());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transcript_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let surface = TranscriptSurface::new(dir.path().join("chat.jsonl"));
        let message = ChatMessage::document_upload("a.txt", "txt", "hello");

        assert!(surface.deliver(&message).await.unwrap());
        assert!(surface.deliver(&message).await.unwrap());

        let content = std::fs::read_to_string(dir.path().join("chat.jsonl")).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_transcript_unavailable_without_directory() {
        let dir = tempfile::tempdir().unwrap();
        let surface = TranscriptSurface::new(dir.path().join("missing").join("chat.jsonl"));
        let message = ChatMessage::document_upload("a.txt", "txt", "hello");

        assert!(!surface.deliver(&message).await.unwrap());
    }
}
