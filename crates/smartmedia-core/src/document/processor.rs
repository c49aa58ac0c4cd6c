//! Document transform.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use smartmedia_extractors::{ExtractionPipeline, Extractor, JsonExtractor, TextExtractor};

use super::shaping::{shape, ShapedContent};
use crate::analysis::Analyzer;
use crate::chat::{ChatDispatcher, ChatMessage};
use crate::config::MediaConfig;
use crate::error::{MediaError, MediaResult};
use crate::traits::ProgressNotifier;
use crate::types::{DocumentResult, DocumentSubtype, ExpectedKind, FileHandle};
use crate::validate::validate;

/// Per-call document options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Run the analyzer when AI reading is enabled.
    pub analyze: bool,
    /// Hand the shaped content to the chat surfaces.
    pub send_to_chat: bool,
    /// Require JSON content to parse.
    pub strict_json: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            analyze: true,
            send_to_chat: true,
            strict_json: false,
        }
    }
}

impl DocumentOptions {
    /// Options with chat delivery turned off.
    pub fn without_chat(mut self) -> Self {
        self.send_to_chat = false;
        self
    }

    /// Options with analysis turned off.
    pub fn without_analysis(mut self) -> Self {
        self.analyze = false;
        self
    }
}

/// Reads, shapes and optionally analyzes documents.
#[derive(Clone)]
pub struct DocumentProcessor {
    config: Arc<MediaConfig>,
    pipeline: Arc<ExtractionPipeline>,
    analyzer: Analyzer,
    chat: ChatDispatcher,
    notifier: Arc<dyn ProgressNotifier>,
}

impl DocumentProcessor {
    /// Document processor over the given collaborators.
    pub fn new(
        config: Arc<MediaConfig>,
        pipeline: Arc<ExtractionPipeline>,
        analyzer: Analyzer,
        chat: ChatDispatcher,
        notifier: Arc<dyn ProgressNotifier>,
    ) -> Self {
        Self {
            config,
            pipeline,
            analyzer,
            chat,
            notifier,
        }
    }

    /// Transform a document, reading it according to its extension.
    pub async fn process(
        &self,
        file: &FileHandle,
        options: &DocumentOptions,
    ) -> MediaResult<DocumentResult> {
        self.run(file, None, options).await
    }

    /// Transform a document whose subtype the caller already knows.
    ///
    /// The JSON subtype requires the content to parse.
    pub async fn process_as(
        &self,
        file: &FileHandle,
        subtype: DocumentSubtype,
        options: &DocumentOptions,
    ) -> MediaResult<DocumentResult> {
        self.run(file, Some(subtype), options).await
    }

    async fn run(
        &self,
        file: &FileHandle,
        subtype: Option<DocumentSubtype>,
        options: &DocumentOptions,
    ) -> MediaResult<DocumentResult> {
        if !self.config.enable_document_processing {
            return Err(MediaError::FeatureDisabled {
                feature: "Document",
            });
        }

        let notify = self.config.show_processing_info;
        if notify {
            self.notifier
                .info("Document", &format!("Reading {}...", file.name));
        }

        match self.transform(file, subtype, options).await {
            Ok(result) => {
                if notify {
                    self.notifier.success(
                        "Document",
                        &format!("{} read ({} characters)", file.name, result.content_length),
                    );
                }
                Ok(result)
            }
            Err(e) => {
                if notify {
                    self.notifier.error("Document", &e.to_string());
                }
                Err(e)
            }
        }
    }

    async fn transform(
        &self,
        file: &FileHandle,
        explicit: Option<DocumentSubtype>,
        options: &DocumentOptions,
    ) -> MediaResult<DocumentResult> {
        let classification = validate(Some(file), Some(ExpectedKind::Document), &self.config)?;
        let extension = classification.extension().to_string();
        let subtype = explicit.unwrap_or_else(|| DocumentSubtype::from_extension(&extension));

        let raw_content = self.read(file, subtype, &extension).await?;

        let strict = explicit == Some(DocumentSubtype::Json)
            || (options.strict_json && subtype == DocumentSubtype::Json);
        let shaped = if strict {
            let extracted = JsonExtractor::new().extract(file.bytes()).await?;
            ShapedContent {
                display: extracted.text,
                structured: extracted.structured,
            }
        } else {
            shape(&raw_content, &extension)
        };

        if self.config.enable_logging {
            tracing::debug!(
                file = %file.name,
                subtype = %subtype,
                raw_chars = raw_content.chars().count(),
                display_chars = shaped.display.chars().count(),
                "Document shaped"
            );
        }

        let (analysis_summary, analysis_error) =
            if self.config.enable_ai_reading && options.analyze {
                let analysis_ext = match subtype {
                    DocumentSubtype::Pdf => "pdf",
                    DocumentSubtype::Json => "json",
                    DocumentSubtype::Text => extension.as_str(),
                };
                match self.analyzer.try_summarize(&raw_content, analysis_ext) {
                    Ok(summary) => (Some(summary), None),
                    Err(e) => {
                        tracing::warn!(file = %file.name, error = %e, "Document analysis failed");
                        (
                            Some(Analyzer::partial_summary(&raw_content, analysis_ext)),
                            Some(e.to_string()),
                        )
                    }
                }
            } else {
                (None, None)
            };

        let source_media_type = if file.declared_media_type.is_empty() {
            "text/plain".to_string()
        } else {
            file.declared_media_type.clone()
        };

        let mut result = DocumentResult {
            content_length: shaped.display.chars().count(),
            display_content: shaped.display,
            raw_content,
            source_extension: extension,
            document_subtype: subtype,
            source_media_type,
            original_size_bytes: file.size_bytes,
            timestamp: Utc::now(),
            structured_data: shaped.structured,
            analysis_summary,
            analysis_error,
            delivered_to_chat: false,
        };

        // Last step: nothing after this can fail the transform.
        if options.send_to_chat {
            let message = ChatMessage::document_upload(
                &file.name,
                &result.source_extension,
                &result.display_content,
            );
            result.delivered_to_chat = self.chat.dispatch(&message).await;
        }

        tracing::info!(
            file = %file.name,
            subtype = %result.document_subtype,
            chars = result.content_length,
            delivered = result.delivered_to_chat,
            "Document processed"
        );

        Ok(result)
    }

    async fn read(
        &self,
        file: &FileHandle,
        subtype: DocumentSubtype,
        extension: &str,
    ) -> MediaResult<String> {
        match subtype {
            DocumentSubtype::Pdf => {
                let extracted = self.pipeline.extract(file.bytes(), "pdf").await?;
                Ok(extracted.text)
            }
            DocumentSubtype::Json | DocumentSubtype::Text if extension == "pdf" => {
                Ok(TextExtractor::decode(file.bytes())?)
            }
            DocumentSubtype::Json | DocumentSubtype::Text => {
                let extracted = self.pipeline.extract(file.bytes(), extension).await?;
                Ok(extracted.text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::RecordingChatSurface;
    use crate::error::ErrorCode;
    use crate::traits::NoopNotifier;

    fn processor(config: MediaConfig) -> (DocumentProcessor, Arc<RecordingChatSurface>) {
        let recorder = Arc::new(RecordingChatSurface::new());
        let processor = DocumentProcessor::new(
            Arc::new(config),
            Arc::new(ExtractionPipeline::with_defaults()),
            Analyzer::default(),
            ChatDispatcher::new().with_surface(recorder.clone()),
            Arc::new(NoopNotifier),
        );
        (processor, recorder)
    }

    #[tokio::test]
    async fn test_text_document() {
        let (processor, recorder) = processor(MediaConfig::default());
        let file = FileHandle::new("notes.md", "text/markdown", b"# Notes\nhello".to_vec());

        let result = processor
            .process(&file, &DocumentOptions::default())
            .await
            .unwrap();

        assert_eq!(result.display_content, "# Notes\nhello");
        assert_eq!(result.raw_content, "# Notes\nhello");
        assert_eq!(result.document_subtype, DocumentSubtype::Text);
        assert_eq!(result.content_length, 13);
        assert!(result.analysis_summary.is_some());
        assert!(result.delivered_to_chat);

        let messages = recorder.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].body_markdown.starts_with("📝 **Document content** (notes.md)"));
    }

    #[tokio::test]
    async fn test_json_shaping_and_structure() {
        let (processor, _) = processor(MediaConfig::default());
        let file = FileHandle::new("data.json", "application/json", br#"{"a":[1,2]}"#.to_vec());

        let result = processor
            .process(&file, &DocumentOptions::default().without_chat())
            .await
            .unwrap();

        assert_eq!(result.document_subtype, DocumentSubtype::Json);
        assert!(result.display_content.contains("\n  \"a\": ["));
        assert_eq!(result.raw_content, r#"{"a":[1,2]}"#);
        assert_eq!(result.structured_data, Some(serde_json::json!({"a": [1, 2]})));
        assert!(!result.delivered_to_chat);
    }

    #[tokio::test]
    async fn test_invalid_json_is_not_an_error() {
        let (processor, _) = processor(MediaConfig::default());
        let file = FileHandle::new("bad.json", "application/json", b"{oops".to_vec());

        let result = processor
            .process(&file, &DocumentOptions::default())
            .await
            .unwrap();
        assert_eq!(result.display_content, "{oops");
        assert!(result.structured_data.is_none());
    }

    #[tokio::test]
    async fn test_explicit_json_is_strict() {
        let (processor, _) = processor(MediaConfig::default());
        let file = FileHandle::new("bad.json", "application/json", b"{oops".to_vec());

        let err = processor
            .process_as(&file, DocumentSubtype::Json, &DocumentOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DocParseFailed);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_read_failure() {
        let (processor, recorder) = processor(MediaConfig::default());
        let file = FileHandle::new("bin.txt", "text/plain", vec![0xff, 0xfe, 0x00, 0xc3]);

        let err = processor
            .process(&file, &DocumentOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DocReadFailed);
        assert!(recorder.messages().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_pdf_is_extraction_failure() {
        let (processor, _) = processor(MediaConfig::default());
        let file = FileHandle::new("paper.pdf", "application/pdf", b"not a pdf".to_vec());

        let err = processor
            .process(&file, &DocumentOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DocExtractionFailed);
    }

    #[tokio::test]
    async fn test_analysis_gates() {
        let config = MediaConfig::builder().ai_reading(false).build();
        let (processor, _) = processor(config);
        let file = FileHandle::new("a.txt", "text/plain", b"hello".to_vec());
        let result = processor
            .process(&file, &DocumentOptions::default())
            .await
            .unwrap();
        assert!(result.analysis_summary.is_none());

        let (processor, _) = self::processor(MediaConfig::default());
        let result = processor
            .process(&file, &DocumentOptions::default().without_analysis())
            .await
            .unwrap();
        assert!(result.analysis_summary.is_none());
    }

    #[tokio::test]
    async fn test_disabled() {
        let config = MediaConfig::builder().document_processing(false).build();
        let (processor, _) = processor(config);
        let file = FileHandle::new("a.txt", "text/plain", b"hello".to_vec());

        assert!(matches!(
            processor.process(&file, &DocumentOptions::default()).await,
            Err(MediaError::FeatureDisabled { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_media_type_falls_back_to_text_plain() {
        let (processor, _) = processor(MediaConfig::default());
        let file = FileHandle::new("app.conf", "", b"key=value".to_vec());

        let result = processor
            .process(&file, &DocumentOptions::default())
            .await
            .unwrap();
        assert_eq!(result.source_media_type, "text/plain");
    }
}
