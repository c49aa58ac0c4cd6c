//! MediaProcessor - the pipeline entry point.

use std::sync::Arc;

use smartmedia_extractors::ExtractionPipeline;

use crate::analysis::Analyzer;
use crate::chat::ChatDispatcher;
use crate::config::MediaConfig;
use crate::detect::detect;
use crate::document::{DocumentOptions, DocumentProcessor};
use crate::error::{MediaError, MediaResult};
use crate::imaging::ImageProcessor;
use crate::traits::{
    BinaryStore, ChatSurface, MemoryBinaryStore, Md5NameHasher, NameHasher, ProgressNotifier,
    TracingNotifier,
};
use crate::types::{
    Classification, DocumentResult, DocumentSubtype, FileHandle, FileKind, ImageResult,
    TransformResult,
};
use crate::validate::validate;

/// Classifies files and dispatches them to the image or document transform.
///
/// Holds an immutable configuration. Use [`MediaProcessor::with_config`] to
/// get a processor for updated settings.
#[derive(Clone)]
pub struct MediaProcessor {
    config: Arc<MediaConfig>,
    store: Arc<dyn BinaryStore>,
    hasher: Arc<dyn NameHasher>,
    notifier: Arc<dyn ProgressNotifier>,
    pipeline: Arc<ExtractionPipeline>,
    analyzer: Analyzer,
    chat: ChatDispatcher,
    images: ImageProcessor,
    documents: DocumentProcessor,
}

impl MediaProcessor {
    /// Processor with default collaborators and the given configuration.
    pub fn new(config: MediaConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Start building a processor with custom collaborators.
    pub fn builder() -> MediaProcessorBuilder {
        MediaProcessorBuilder::default()
    }

    /// The configuration this processor runs with.
    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// A processor sharing this one's collaborators with a new configuration.
    ///
    /// The configuration is clamped to the host UI's ranges.
    pub fn with_config(&self, config: MediaConfig) -> Self {
        Self::assemble(
            Arc::new(config.normalized()),
            self.store.clone(),
            self.hasher.clone(),
            self.notifier.clone(),
            self.pipeline.clone(),
            self.analyzer.clone(),
            self.chat.clone(),
        )
    }

    fn assemble(
        config: Arc<MediaConfig>,
        store: Arc<dyn BinaryStore>,
        hasher: Arc<dyn NameHasher>,
        notifier: Arc<dyn ProgressNotifier>,
        pipeline: Arc<ExtractionPipeline>,
        analyzer: Analyzer,
        chat: ChatDispatcher,
    ) -> Self {
        let images = ImageProcessor::new(
            config.clone(),
            store.clone(),
            hasher.clone(),
            notifier.clone(),
        );
        let documents = DocumentProcessor::new(
            config.clone(),
            pipeline.clone(),
            analyzer.clone(),
            chat.clone(),
            notifier.clone(),
        );
        Self {
            config,
            store,
            hasher,
            notifier,
            pipeline,
            analyzer,
            chat,
            images,
            documents,
        }
    }

    /// Classify a file without processing it.
    pub fn classify(&self, file: &FileHandle) -> Classification {
        detect(Some(file), &self.config)
    }

    /// Validate, then run the transform matching the file's kind.
    pub async fn process_file(
        &self,
        file: &FileHandle,
        options: &DocumentOptions,
    ) -> MediaResult<TransformResult> {
        let classification = validate(Some(file), None, &self.config)?;

        match classification.kind() {
            FileKind::Image => Ok(TransformResult::Image(self.images.process(file).await?)),
            FileKind::Document => Ok(TransformResult::Document(
                self.documents.process(file, options).await?,
            )),
            FileKind::Unknown => Err(MediaError::unsupported(
                format!("{} has an unsupported file type", file.name),
                &file.name,
                &file.declared_media_type,
            )),
        }
    }

    /// Run the document transform with an explicit subtype.
    pub async fn process_document_as(
        &self,
        file: &FileHandle,
        subtype: DocumentSubtype,
        options: &DocumentOptions,
    ) -> MediaResult<DocumentResult> {
        self.documents.process_as(file, subtype, options).await
    }

    /// Run the image transform directly.
    pub async fn transform_image(&self, file: &FileHandle) -> MediaResult<ImageResult> {
        self.images.process(file).await
    }

    /// Run the document transform directly, reading by extension.
    pub async fn transform_document(
        &self,
        file: &FileHandle,
        options: &DocumentOptions,
    ) -> MediaResult<DocumentResult> {
        self.documents.process(file, options).await
    }
}

impl Default for MediaProcessor {
    fn default() -> Self {
        Self::new(MediaConfig::default())
    }
}

impl std::fmt::Debug for MediaProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaProcessor")
            .field("config", &self.config)
            .field("chat", &self.chat)
            .finish_non_exhaustive()
    }
}

/// Builder for [`MediaProcessor`].
#[derive(Default)]
pub struct MediaProcessorBuilder {
    config: Option<MediaConfig>,
    store: Option<Arc<dyn BinaryStore>>,
    hasher: Option<Arc<dyn NameHasher>>,
    notifier: Option<Arc<dyn ProgressNotifier>>,
    pipeline: Option<ExtractionPipeline>,
    analyzer: Option<Analyzer>,
    chat: ChatDispatcher,
}

impl MediaProcessorBuilder {
    /// Configuration to run with. Defaults to [`MediaConfig::default`].
    pub fn config(mut self, config: MediaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Binary sink for re-encoded images. Defaults to an in-memory store.
    pub fn store(mut self, store: Arc<dyn BinaryStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Hasher for produced image names. Defaults to md5.
    pub fn hasher(mut self, hasher: Arc<dyn NameHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Progress notifier. Defaults to tracing.
    pub fn notifier(mut self, notifier: Arc<dyn ProgressNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Extraction pipeline for document reads.
    pub fn pipeline(mut self, pipeline: ExtractionPipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Document analyzer. Defaults to the heuristic one.
    pub fn analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Append a chat surface. Surfaces are tried in the order added.
    pub fn chat_surface(mut self, surface: Arc<dyn ChatSurface>) -> Self {
        self.chat = self.chat.with_surface(surface);
        self
    }

    /// Build the processor. The configuration is clamped to the host UI's ranges.
    pub fn build(self) -> MediaProcessor {
        MediaProcessor::assemble(
            Arc::new(self.config.unwrap_or_default().normalized()),
            self.store
                .unwrap_or_else(|| Arc::new(MemoryBinaryStore::new())),
            self.hasher.unwrap_or_else(|| Arc::new(Md5NameHasher)),
            self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
            Arc::new(
                self.pipeline
                    .unwrap_or_else(ExtractionPipeline::with_defaults),
            ),
            self.analyzer.unwrap_or_default(),
            self.chat,
        )
    }
}
