//! Factory for creating extractors.

use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::pdf::PdfExtractor;
use crate::text::{JsonExtractor, TextExtractor};
use crate::Extractor;

/// Factory for creating content extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a PDF extractor backed by the process-wide engine loader.
    pub fn pdf() -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::new())
    }

    /// Create a UTF-8 text extractor.
    pub fn text() -> Arc<dyn Extractor> {
        Arc::new(TextExtractor::new())
    }

    /// Create a strict JSON extractor.
    pub fn json() -> Arc<dyn Extractor> {
        Arc::new(JsonExtractor::new())
    }

    /// Create extractor for a given extension.
    pub fn for_extension(extension: &str) -> ExtractResult<Arc<dyn Extractor>> {
        let all = Self::all();
        all.into_iter()
            .find(|e| e.supports(extension))
            .ok_or_else(|| ExtractError::UnsupportedType(extension.to_string()))
    }

    /// Get all available extractors.
    pub fn all() -> Vec<Arc<dyn Extractor>> {
        vec![Self::pdf(), Self::json(), Self::text()]
    }
}
