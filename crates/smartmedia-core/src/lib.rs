//! smartmedia-core - Classification, validation and transformation of chat
//! attachments.
//!
//! Files handed over by a chat host are classified as image or document,
//! checked against the configured limits, and transformed: images are
//! bounded, re-encoded as JPEG and stored; documents are read, shaped for
//! display, optionally summarized and optionally posted to the chat.
//!
//! # Example
//!
//! ```ignore
//! use smartmedia_core::{DocumentOptions, FileHandle, MediaConfig, MediaProcessor};
//!
//! let processor = MediaProcessor::builder()
//!     .config(MediaConfig::default())
//!     .store(Arc::new(FsBinaryStore::new("./data")))
//!     .build();
//!
//! let file = FileHandle::from_path("notes.csv").await?;
//! let outcome = processor.process_any_file(&file, &DocumentOptions::default()).await;
//! if !outcome.success {
//!     eprintln!("{}", outcome.error.unwrap_or_default());
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod chat;
pub mod config;
pub mod detect;
pub mod document;
pub mod error;
pub mod imaging;
pub mod processor;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use analysis::{Analyzer, DocumentAnalyzer, HeuristicAnalyzer};
pub use api::SupportedTypes;
pub use chat::{ChatDispatcher, ChatMessage, RecordingChatSurface};
pub use config::{
    JsonFileSettingsStore, MediaConfig, MemorySettingsStore, SettingsStore, MODULE_ID,
};
pub use detect::{detect, extension_of, is_document};
pub use document::{DocumentOptions, DocumentProcessor};
pub use error::{ErrorCode, MediaError, MediaResult};
pub use imaging::ImageProcessor;
pub use processor::{MediaProcessor, MediaProcessorBuilder};
pub use traits::{
    BinaryStore, ChatSurface, FsBinaryStore, MemoryBinaryStore, Md5NameHasher, NameHasher,
    NoopNotifier, ProgressNotifier, TracingNotifier,
};
pub use types::{
    Classification, DocumentResult, DocumentSubtype, ExpectedKind, FileHandle, FileKind,
    ImageResult, ProcessOutcome, TransformResult,
};
pub use validate::validate;
