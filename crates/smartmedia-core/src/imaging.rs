//! Image transform: validate, bound dimensions, re-encode as JPEG, store.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use smartmedia_extractors::{ImageTranscoder, TranscodeOptions};

use crate::config::MediaConfig;
use crate::error::{MediaError, MediaResult};
use crate::traits::{BinaryStore, NameHasher, ProgressNotifier};
use crate::types::{ExpectedKind, FileHandle, ImageResult};
use crate::validate::validate;

/// Logical path re-encoded images are stored under.
pub const IMAGE_STORAGE_PATH: &str = "user/images";

/// Estimated decoded size of a base64 payload.
pub fn estimate_decoded_size(base64_len: usize) -> u64 {
    (base64_len as f64 * 0.75).round() as u64
}

/// Re-encodes images and hands them to the binary store.
#[derive(Clone)]
pub struct ImageProcessor {
    config: Arc<MediaConfig>,
    store: Arc<dyn BinaryStore>,
    hasher: Arc<dyn NameHasher>,
    notifier: Arc<dyn ProgressNotifier>,
}

impl ImageProcessor {
    /// Image processor writing through `store`.
    pub fn new(
        config: Arc<MediaConfig>,
        store: Arc<dyn BinaryStore>,
        hasher: Arc<dyn NameHasher>,
        notifier: Arc<dyn ProgressNotifier>,
    ) -> Self {
        Self {
            config,
            store,
            hasher,
            notifier,
        }
    }

    /// Storage identifier: `{utc_millis}_{name_hash}`.
    pub fn unique_id(&self, original_name: &str) -> String {
        format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            self.hasher.hash(original_name)
        )
    }

    /// Transform one image. Nothing is stored unless every step before the
    /// store succeeds.
    pub async fn process(&self, file: &FileHandle) -> MediaResult<ImageResult> {
        if !self.config.enable_image_processing {
            return Err(MediaError::FeatureDisabled { feature: "Image" });
        }

        let notify = self.config.show_processing_info;
        if notify {
            self.notifier
                .info("Image", &format!("Processing {}...", file.name));
        }

        match self.transform(file).await {
            Ok(result) => {
                if notify {
                    self.notifier.success(
                        "Image",
                        &format!("{} ready ({}x{})", file.name, result.width, result.height),
                    );
                }
                Ok(result)
            }
            Err(e) => {
                if notify {
                    self.notifier.error("Image", &e.to_string());
                }
                Err(e)
            }
        }
    }

    async fn transform(&self, file: &FileHandle) -> MediaResult<ImageResult> {
        validate(Some(file), Some(ExpectedKind::Image), &self.config)?;

        let transcoder = ImageTranscoder::new(TranscodeOptions {
            max_dimension: self.config.max_image_dimension,
            quality: self.config.image_quality,
        });
        let image = transcoder.transcode(file.bytes()).await?;

        if self.config.enable_logging {
            tracing::debug!(
                file = %file.name,
                source_width = image.source_width,
                source_height = image.source_height,
                width = image.width,
                height = image.height,
                resized = image.was_resized(),
                "Image re-encoded"
            );
        }

        let encoded = STANDARD.encode(&image.bytes);
        let unique_id = self.unique_id(&file.name);
        let url = self
            .store
            .store(&encoded, IMAGE_STORAGE_PATH, &unique_id, "jpg")
            .await?;

        let source_media_type = if file.declared_media_type.is_empty() {
            image
                .source_format
                .map(|f| format!("image/{}", f))
                .unwrap_or_default()
        } else {
            file.declared_media_type.clone()
        };

        tracing::info!(file = %file.name, url = %url, "Image processed");

        Ok(ImageResult {
            url,
            original_name: file.name.clone(),
            produced_name: format!("{}.jpg", unique_id),
            original_size_bytes: file.size_bytes,
            estimated_produced_size_bytes: estimate_decoded_size(encoded.len()),
            source_media_type,
            width: image.width,
            height: image.height,
            optimized: true,
            timestamp: Utc::now(),
        })
    }
}
