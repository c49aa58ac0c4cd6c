//! Host-facing entry points.
//!
//! Every function here returns a [`ProcessOutcome`]; failures are reported
//! through `success: false` and never escape as errors.

use serde::Serialize;

use crate::config::MediaConfig;
use crate::detect::detect;
use crate::document::DocumentOptions;
use crate::error::{MediaError, MediaResult};
use crate::processor::MediaProcessor;
use crate::types::{FileHandle, ProcessOutcome, TransformResult};

/// Accepted media types and extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportedTypes {
    pub images: Vec<String>,
    pub documents: Vec<String>,
    pub image_extensions: Vec<String>,
    pub document_extensions: Vec<String>,
}

impl SupportedTypes {
    /// Supported types as configured.
    pub fn from_config(config: &MediaConfig) -> Self {
        Self {
            images: config.supported_image_types.clone(),
            documents: config.supported_document_types.clone(),
            image_extensions: config.supported_image_extensions.clone(),
            document_extensions: config.supported_document_extensions.clone(),
        }
    }

    /// Image and document media types together.
    pub fn all(&self) -> Vec<String> {
        self.images
            .iter()
            .chain(self.documents.iter())
            .cloned()
            .collect()
    }
}

impl MediaProcessor {
    /// Classify and process any supported file.
    pub async fn process_any_file(
        &self,
        file: &FileHandle,
        options: &DocumentOptions,
    ) -> ProcessOutcome {
        let result = self.process_file(file, options).await;
        self.outcome(file, result)
    }

    /// Process a file that must be an image.
    pub async fn process_image(&self, file: &FileHandle) -> ProcessOutcome {
        let result = self
            .transform_image(file)
            .await
            .map(TransformResult::Image);
        self.outcome(file, result)
    }

    /// Process a file that must be a document.
    pub async fn process_document(
        &self,
        file: &FileHandle,
        options: &DocumentOptions,
    ) -> ProcessOutcome {
        let result = self
            .transform_document(file, options)
            .await
            .map(TransformResult::Document);
        self.outcome(file, result)
    }

    /// Whether a file would be treated as a document.
    pub fn is_document(&self, file: &FileHandle) -> bool {
        crate::detect::is_document(Some(file), self.config())
    }

    /// Types this processor accepts.
    pub fn supported_types(&self) -> SupportedTypes {
        SupportedTypes::from_config(self.config())
    }

    fn outcome(&self, file: &FileHandle, result: MediaResult<TransformResult>) -> ProcessOutcome {
        match result {
            Ok(result) => ProcessOutcome::succeeded(&file.name, file.size_bytes, result),
            Err(e) => {
                log_failure(file, &e);
                let kind = detect(Some(file), self.config()).kind();
                ProcessOutcome::failed(&file.name, file.size_bytes, kind, &e)
            }
        }
    }
}

fn log_failure(file: &FileHandle, error: &MediaError) {
    if error.is_validation() {
        tracing::warn!(file = %file.name, code = error.code().as_str(), error = %error, "File rejected");
    } else {
        tracing::error!(file = %file.name, code = error.code().as_str(), error = %error, "File processing failed");
    }
}
