//! PDF text extraction.
//!
//! The engine that actually parses PDF bytes is acquired lazily through a
//! [`PdfEngineLoader`], which tries an ordered list of [`PdfEngineSource`]s and
//! caches the first one that loads. The bundled source wraps `pdf-extract`.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use tokio::sync::OnceCell;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent, Modality};
use crate::Extractor;

/// A loaded PDF text engine.
pub trait PdfEngine: Send + Sync {
    /// Extract the text of every page, in page order.
    fn extract_pages(&self, content: &[u8]) -> Result<Vec<String>, String>;

    /// Human-readable engine name.
    fn name(&self) -> &str;
}

/// A place a PDF engine can be loaded from.
pub trait PdfEngineSource: Send + Sync {
    /// Name used in logs and in the consolidated failure message.
    fn name(&self) -> &str;

    /// Try to produce an engine.
    fn load(&self) -> Result<Arc<dyn PdfEngine>, String>;
}

/// `pdf-extract` backed engine.
#[cfg(feature = "pdf")]
#[derive(Debug, Clone, Default)]
pub struct PdfExtractEngine;

#[cfg(feature = "pdf")]
impl PdfEngine for PdfExtractEngine {
    fn extract_pages(&self, content: &[u8]) -> Result<Vec<String>, String> {
        // pdf-extract can panic on malformed fonts/glyphs
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(content)
        })) {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err("PDF parser panicked, document likely contains malformed fonts".to_string()),
        }
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}

/// Source for the engine compiled into this crate.
#[cfg(feature = "pdf")]
#[derive(Debug, Clone, Default)]
pub struct BundledPdfSource;

#[cfg(feature = "pdf")]
impl PdfEngineSource for BundledPdfSource {
    fn name(&self) -> &str {
        "bundled"
    }

    fn load(&self) -> Result<Arc<dyn PdfEngine>, String> {
        Ok(Arc::new(PdfExtractEngine))
    }
}

static GLOBAL_LOADER: Lazy<Arc<PdfEngineLoader>> =
    Lazy::new(|| Arc::new(PdfEngineLoader::with_defaults()));

/// Lazily acquires a PDF engine at most once.
///
/// Sources are tried in order. The first engine that loads is cached for the
/// lifetime of the loader; if every source fails, the failures are reported as
/// one [`ExtractError::EngineUnavailable`] and nothing is cached, so a later
/// call tries again.
pub struct PdfEngineLoader {
    sources: Vec<Arc<dyn PdfEngineSource>>,
    engine: OnceCell<Arc<dyn PdfEngine>>,
}

impl PdfEngineLoader {
    /// Create a loader over an explicit source list.
    pub fn new(sources: Vec<Arc<dyn PdfEngineSource>>) -> Self {
        Self {
            sources,
            engine: OnceCell::new(),
        }
    }

    /// Create a loader with the sources compiled into this crate.
    #[allow(clippy::vec_init_then_push)]
    pub fn with_defaults() -> Self {
        let mut sources: Vec<Arc<dyn PdfEngineSource>> = Vec::new();

        #[cfg(feature = "pdf")]
        sources.push(Arc::new(BundledPdfSource));

        Self::new(sources)
    }

    /// The process-wide loader.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_LOADER)
    }

    /// Append a fallback source.
    pub fn add_source(mut self, source: Arc<dyn PdfEngineSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Whether an engine has already been acquired.
    pub fn is_loaded(&self) -> bool {
        self.engine.initialized()
    }

    /// Get the cached engine, acquiring it on first use.
    pub async fn engine(&self) -> ExtractResult<Arc<dyn PdfEngine>> {
        self.engine
            .get_or_try_init(|| async { self.acquire() })
            .await
            .map(Arc::clone)
    }

    fn acquire(&self) -> ExtractResult<Arc<dyn PdfEngine>> {
        if self.sources.is_empty() {
            return Err(ExtractError::EngineUnavailable(
                "no PDF engine sources configured".to_string(),
            ));
        }

        let mut failures = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            match source.load() {
                Ok(engine) => {
                    tracing::debug!(source = source.name(), engine = engine.name(), "PDF engine loaded");
                    return Ok(engine);
                }
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "PDF engine source failed");
                    failures.push(format!("{}: {}", source.name(), e));
                }
            }
        }

        Err(ExtractError::EngineUnavailable(failures.join("; ")))
    }
}

impl Default for PdfEngineLoader {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn post_process_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// PDF content extractor.
///
/// Pages are joined with single spaces in page order, then whitespace is
/// normalized. Parsing runs in spawn_blocking.
#[derive(Clone)]
pub struct PdfExtractor {
    loader: Arc<PdfEngineLoader>,
}

impl PdfExtractor {
    /// Create a PDF extractor backed by the process-wide loader.
    pub fn new() -> Self {
        Self {
            loader: PdfEngineLoader::global(),
        }
    }

    /// Create a PDF extractor with a dedicated loader.
    pub fn with_loader(loader: Arc<PdfEngineLoader>) -> Self {
        Self { loader }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let engine = self.loader.engine().await?;
        let bytes = content.to_vec();
        let content_len = bytes.len();

        let pages = tokio::task::spawn_blocking(move || engine.extract_pages(&bytes))
            .await?
            .map_err(ExtractError::Pdf)?;

        let text = post_process_text(&pages.join(" "));
        tracing::debug!(pages = pages.len(), chars = text.len(), "PDF text extracted");

        let structure = DocumentStructure {
            page_count: Some(pages.len()),
            pages,
        };

        Ok(ExtractedContent::new(text, Modality::Pdf)
            .with_structure(structure)
            .with_metadata("original_size", content_len))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticEngine(Vec<&'static str>);

    impl PdfEngine for StaticEngine {
        fn extract_pages(&self, _content: &[u8]) -> Result<Vec<String>, String> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    struct CountingSource {
        loads: AtomicUsize,
        fail: bool,
        pages: Vec<&'static str>,
    }

    impl CountingSource {
        fn ok(pages: Vec<&'static str>) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                fail: false,
                pages,
            }
        }

        fn failing() -> Self {
            Self {
                loads: AtomicUsize::new(0),
                fail: true,
                pages: Vec::new(),
            }
        }
    }

    impl PdfEngineSource for CountingSource {
        fn name(&self) -> &str {
            if self.fail {
                "broken-mirror"
            } else {
                "static-mirror"
            }
        }

        fn load(&self) -> Result<Arc<dyn PdfEngine>, String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err("unreachable".to_string())
            } else {
                Ok(Arc::new(StaticEngine(self.pages.clone())))
            }
        }
    }

    #[test]
    fn test_post_process_text() {
        assert_eq!(post_process_text("  a \n\n b\t c  "), "a b c");
        assert_eq!(post_process_text(""), "");
    }

    #[tokio::test]
    async fn test_loader_falls_through_sources_and_caches() {
        let broken = Arc::new(CountingSource::failing());
        let good = Arc::new(CountingSource::ok(vec!["one"]));
        let loader = PdfEngineLoader::new(vec![broken.clone(), good.clone()]);

        assert!(!loader.is_loaded());
        loader.engine().await.unwrap();
        loader.engine().await.unwrap();

        assert!(loader.is_loaded());
        assert_eq!(broken.loads.load(Ordering::SeqCst), 1);
        assert_eq!(good.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loader_consolidates_failures() {
        let loader = PdfEngineLoader::new(vec![
            Arc::new(CountingSource::failing()),
            Arc::new(CountingSource::failing()),
        ]);

        match loader.engine().await {
            Err(ExtractError::EngineUnavailable(msg)) => {
                assert_eq!(msg.matches("broken-mirror").count(), 2);
            }
            other => panic!("expected EngineUnavailable, got {:?}", other.map(|e| e.name().to_string())),
        }
        assert!(!loader.is_loaded());
    }

    #[tokio::test]
    async fn test_empty_loader_is_unavailable() {
        let loader = PdfEngineLoader::new(Vec::new());
        assert!(matches!(
            loader.engine().await,
            Err(ExtractError::EngineUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_extractor_joins_pages_with_spaces() {
        let loader = PdfEngineLoader::new(vec![Arc::new(CountingSource::ok(vec![
            "First  page\n",
            "second\tpage",
        ]))]);
        let extractor = PdfExtractor::with_loader(Arc::new(loader));

        let result = extractor.extract(b"%PDF-1.4").await.unwrap();
        assert_eq!(result.text, "First page second page");
        assert_eq!(result.modality, Modality::Pdf);
        assert_eq!(result.structure.unwrap().page_count, Some(2));
    }

    #[cfg(feature = "pdf")]
    #[tokio::test]
    async fn test_bundled_engine_rejects_garbage() {
        let extractor = PdfExtractor::new();
        let result = extractor.extract(b"definitely not a pdf").await;
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }
}
