//! Image decode, bounded resize and JPEG re-encode.
//!
//! Every call decodes into its own buffer on a blocking task; nothing is
//! shared between transcodes.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::{ExtractError, ExtractResult};

/// Options for one transcode.
#[derive(Debug, Clone, Copy)]
pub struct TranscodeOptions {
    /// Largest allowed width or height in pixels.
    pub max_dimension: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            max_dimension: 2048,
            quality: 85,
        }
    }
}

/// Output of a transcode.
#[derive(Debug, Clone)]
pub struct TranscodedImage {
    /// Encoded JPEG bytes.
    pub bytes: Vec<u8>,
    /// Width after resize.
    pub width: u32,
    /// Height after resize.
    pub height: u32,
    /// Width of the decoded source.
    pub source_width: u32,
    /// Height of the decoded source.
    pub source_height: u32,
    /// Source format sniffed from magic bytes, if recognized.
    pub source_format: Option<&'static str>,
}

impl TranscodedImage {
    /// Whether the image was scaled down.
    pub fn was_resized(&self) -> bool {
        self.width != self.source_width || self.height != self.source_height
    }
}

/// Compute bounded dimensions.
///
/// Sizes within `max_dimension` on both axes are returned unchanged (no
/// upscaling). Otherwise the larger side becomes exactly `max_dimension` and the
/// other side is scaled by the same factor and truncated, never below 1.
/// A `max_dimension` of 0 is treated as 1.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max_dimension = max_dimension.max(1);
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }

    let scale = |side: u32, larger: u32| -> u32 {
        let scaled = (side as f64 * max_dimension as f64 / larger as f64) as u32;
        scaled.max(1)
    };

    if width > height {
        (max_dimension, scale(height, width))
    } else {
        (scale(width, height), max_dimension)
    }
}

/// Detect image format from magic bytes.
pub fn detect_format(content: &[u8]) -> Option<&'static str> {
    if content.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Some("png")
    } else if content.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpeg")
    } else if content.starts_with(b"GIF87a") || content.starts_with(b"GIF89a") {
        Some("gif")
    } else if content.starts_with(b"RIFF") && content.len() > 12 && &content[8..12] == b"WEBP" {
        Some("webp")
    } else if content.starts_with(b"BM") {
        Some("bmp")
    } else {
        None
    }
}

/// Decodes, resizes and re-encodes images as JPEG.
#[derive(Debug, Clone, Default)]
pub struct ImageTranscoder {
    options: TranscodeOptions,
}

impl ImageTranscoder {
    /// Create a transcoder with the given options.
    pub fn new(options: TranscodeOptions) -> Self {
        Self { options }
    }

    /// Transcode on a blocking task.
    pub async fn transcode(&self, content: &[u8]) -> ExtractResult<TranscodedImage> {
        let bytes = content.to_vec();
        let options = self.options;
        tokio::task::spawn_blocking(move || Self::transcode_sync(&bytes, options)).await?
    }

    /// Synchronous transcode.
    pub fn transcode_sync(content: &[u8], options: TranscodeOptions) -> ExtractResult<TranscodedImage> {
        let source_format = detect_format(content);
        let decoded =
            image::load_from_memory(content).map_err(|e| ExtractError::Decode(e.to_string()))?;

        let (source_width, source_height) = (decoded.width(), decoded.height());
        let (width, height) = target_dimensions(source_width, source_height, options.max_dimension);

        let resized = if (width, height) == (source_width, source_height) {
            decoded
        } else {
            decoded.resize_exact(width, height, FilterType::Lanczos3)
        };

        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, options.quality.clamp(1, 100));
        rgb.write_with_encoder(encoder)
            .map_err(|e| ExtractError::Encode(e.to_string()))?;

        Ok(TranscodedImage {
            bytes: buffer.into_inner(),
            width,
            height,
            source_width,
            source_height,
            source_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 128]));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_target_dimensions_landscape() {
        assert_eq!(target_dimensions(4000, 2000, 2048), (2048, 1024));
    }

    #[test]
    fn test_target_dimensions_portrait() {
        assert_eq!(target_dimensions(1500, 3000, 2048), (1024, 2048));
    }

    #[test]
    fn test_target_dimensions_square() {
        assert_eq!(target_dimensions(3000, 3000, 2048), (2048, 2048));
    }

    #[test]
    fn test_target_dimensions_no_upscale() {
        assert_eq!(target_dimensions(1000, 500, 2048), (1000, 500));
        assert_eq!(target_dimensions(2048, 2048, 2048), (2048, 2048));
    }

    #[test]
    fn test_target_dimensions_truncates_and_floors_at_one() {
        assert_eq!(target_dimensions(3000, 1000, 2048), (2048, 682));
        assert_eq!(target_dimensions(10000, 1, 512), (512, 1));
    }

    #[test]
    fn test_target_dimensions_zero_bound() {
        assert_eq!(target_dimensions(40, 20, 0), (1, 1));
        assert_eq!(target_dimensions(1, 1, 0), (1, 1));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]), Some("png"));
        assert_eq!(detect_format(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("jpeg"));
        assert_eq!(detect_format(b"GIF89a\x00\x00"), Some("gif"));
        assert_eq!(detect_format(b"BM\x00\x00"), Some("bmp"));
        assert_eq!(detect_format(&[0x00, 0x01, 0x02]), None);
    }

    #[tokio::test]
    async fn test_transcode_downscales_to_jpeg() {
        let transcoder = ImageTranscoder::new(TranscodeOptions {
            max_dimension: 64,
            quality: 80,
        });

        let out = transcoder.transcode(&png_fixture(200, 100)).await.unwrap();
        assert_eq!((out.width, out.height), (64, 32));
        assert_eq!((out.source_width, out.source_height), (200, 100));
        assert_eq!(out.source_format, Some("png"));
        assert!(out.was_resized());
        assert_eq!(detect_format(&out.bytes), Some("jpeg"));
    }

    #[tokio::test]
    async fn test_transcode_keeps_small_images() {
        let transcoder = ImageTranscoder::default();
        let out = transcoder.transcode(&png_fixture(20, 10)).await.unwrap();
        assert_eq!((out.width, out.height), (20, 10));
        assert!(!out.was_resized());
    }

    #[tokio::test]
    async fn test_transcode_rejects_garbage() {
        let transcoder = ImageTranscoder::default();
        let result = transcoder.transcode(b"not an image at all").await;
        assert!(matches!(result, Err(ExtractError::Decode(_))));
    }
}
