//! Extraction pipeline for routing content to the right extractor.

use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::types::ExtractedContent;
use crate::Extractor;

/// Pipeline for extracting content using registered extractors.
///
/// Routes content by file extension. Extensions no registered extractor
/// claims go to the fallback extractor, if one is set.
pub struct ExtractionPipeline {
    extractors: Vec<Arc<dyn Extractor>>,
    fallback: Option<Arc<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Create new empty pipeline.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
            fallback: None,
        }
    }

    /// Create pipeline with the PDF extractor and a UTF-8 text fallback.
    pub fn with_defaults() -> Self {
        Self {
            extractors: vec![crate::ExtractorFactory::pdf()],
            fallback: Some(crate::ExtractorFactory::text()),
        }
    }

    /// Add an extractor to the pipeline.
    pub fn add_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Set the extractor used when no registered one matches.
    pub fn with_fallback(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.fallback = Some(extractor);
        self
    }

    /// Find the extractor for an extension.
    pub fn extractor_for(&self, extension: &str) -> Option<&Arc<dyn Extractor>> {
        self.extractors
            .iter()
            .find(|e| e.supports(extension))
            .or(self.fallback.as_ref())
    }

    /// Extract content using the appropriate extractor for the extension.
    pub async fn extract(&self, content: &[u8], extension: &str) -> ExtractResult<ExtractedContent> {
        match self.extractor_for(extension) {
            Some(extractor) => {
                tracing::debug!(extractor = extractor.name(), extension, "Routing content");
                extractor.extract(content).await
            }
            None => Err(ExtractError::UnsupportedType(extension.to_string())),
        }
    }

    /// Check if pipeline can handle a given extension.
    pub fn supports(&self, extension: &str) -> bool {
        self.extractor_for(extension).is_some()
    }

    /// List all explicitly supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.extractors
            .iter()
            .chain(self.fallback.iter())
            .flat_map(|e| e.supported_extensions().iter().copied())
            .collect()
    }

    /// Get the number of registered extractors, fallback excluded.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the pipeline has no registered extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Modality;
    use crate::{JsonExtractor, TextExtractor};

    #[test]
    fn test_pipeline_creation() {
        let pipeline = ExtractionPipeline::with_defaults();
        assert!(pipeline.supports("pdf"));
        assert!(pipeline.supports("txt"));
        // the text fallback accepts anything
        assert!(pipeline.supports("whatever"));
        assert_eq!(pipeline.len(), 1);
    }

    #[test]
    fn test_pipeline_empty() {
        let pipeline = ExtractionPipeline::new();
        assert!(pipeline.is_empty());
        assert!(!pipeline.supports("txt"));
    }

    #[tokio::test]
    async fn test_pipeline_unsupported_type_error() {
        let pipeline = ExtractionPipeline::new();
        let result = pipeline.extract(b"test", "mp4").await;
        assert!(matches!(result, Err(ExtractError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn test_pipeline_routes_by_extension() {
        let pipeline = ExtractionPipeline::new()
            .add_extractor(Arc::new(JsonExtractor::new()))
            .with_fallback(Arc::new(TextExtractor::new()));

        let json = pipeline.extract(br#"{"k":"v"}"#, "json").await.unwrap();
        assert_eq!(json.modality, Modality::Json);

        let text = pipeline.extract(b"key=value", "ini").await.unwrap();
        assert_eq!(text.modality, Modality::Text);
        assert_eq!(text.text, "key=value");
    }
}
