//! Extraction error types.

use thiserror::Error;

/// Errors that can occur during content extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No extractor handles the given extension.
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    /// Extraction process failed.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Bytes were not valid UTF-8 text.
    #[error("Invalid UTF-8 content: {0}")]
    InvalidUtf8(String),

    /// JSON content did not parse.
    #[error("JSON parse error: {0}")]
    Json(String),

    /// PDF-specific extraction error.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// No PDF engine source could be loaded.
    #[error("PDF engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Image bytes could not be decoded.
    #[error("Image decode error: {0}")]
    Decode(String),

    /// Re-encoding the resized image failed.
    #[error("Image encode error: {0}")]
    Encode(String),

    /// IO error during extraction.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
