//! smartmedia-extractors - Byte-level extraction for the smartmedia pipeline.
//!
//! Provides readers for UTF-8 text, JSON and PDF behind a unified
//! trait-based interface, plus an image transcoder that bounds dimensions and
//! re-encodes to JPEG.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//! - `image` (default) - Image decode/resize/encode via the image crate
//!
//! # Example
//!
//! ```ignore
//! use smartmedia_extractors::{ExtractionPipeline, ImageTranscoder, TranscodeOptions};
//!
//! // Route by extension: pdf goes to the PDF engine, everything else is read as text
//! let pipeline = ExtractionPipeline::with_defaults();
//! let result = pipeline.extract(&pdf_bytes, "pdf").await?;
//!
//! let transcoder = ImageTranscoder::new(TranscodeOptions { max_dimension: 2048, quality: 85 });
//! let jpeg = transcoder.transcode(&png_bytes).await?;
//! ```

mod error;
mod factory;
mod pipeline;
mod text;
mod types;

pub mod pdf;

#[cfg(feature = "image")]
pub mod transcode;

pub use error::{ExtractError, ExtractResult};
pub use factory::ExtractorFactory;
pub use pdf::{post_process_text, PdfEngine, PdfEngineLoader, PdfEngineSource, PdfExtractor};
pub use pipeline::ExtractionPipeline;
pub use text::{JsonExtractor, TextExtractor};
pub use types::{DocumentStructure, ExtractedContent, Modality};

#[cfg(feature = "image")]
pub use transcode::{target_dimensions, ImageTranscoder, TranscodeOptions, TranscodedImage};

use async_trait::async_trait;

/// Core Extractor trait - all content extractors implement this.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text content from bytes.
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent>;

    /// Lowercased file extensions (no leading dot) this extractor handles.
    fn supported_extensions(&self) -> &[&str];

    /// Check if this extractor handles the given extension.
    fn supports(&self, extension: &str) -> bool {
        self.supported_extensions().contains(&extension)
    }

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
