//! Configuration system for smartmedia.
//!
//! [`MediaConfig`] is an immutable value threaded into every stage. Hosts
//! produce a new value (from a file, the environment, or their persisted
//! settings merged over defaults) instead of mutating one in place.

mod settings;

pub use settings::{JsonFileSettingsStore, MemorySettingsStore, SettingsStore};

use serde::{Deserialize, Serialize};

use crate::error::{MediaError, MediaResult};

/// Identifier the host keys persisted settings under.
pub const MODULE_ID: &str = "smart-media-assistant";

/// Bytes per configured megabyte.
pub const BYTES_PER_MB: u64 = 1_048_576;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Whether images are processed at all.
    #[serde(alias = "enableImageProcessing")]
    pub enable_image_processing: bool,
    /// Whether documents are processed at all.
    #[serde(alias = "enableDocumentProcessing")]
    pub enable_document_processing: bool,
    /// JPEG quality, 10-100.
    #[serde(alias = "imageQuality")]
    pub image_quality: u8,
    /// Largest width or height of a re-encoded image, 512-4096 px.
    #[serde(alias = "maxImageDimension")]
    pub max_image_dimension: u32,
    /// Size limit in megabytes, 1-100.
    #[serde(alias = "maxFileSize")]
    pub max_file_size: u32,
    /// Whether documents get a heuristic analysis summary.
    #[serde(alias = "enableAIReading")]
    pub enable_ai_reading: bool,
    /// Whether progress notifications are emitted.
    #[serde(alias = "showProcessingInfo")]
    pub show_processing_info: bool,
    /// Whether stage decisions are logged at debug level.
    #[serde(alias = "enableLogging")]
    pub enable_logging: bool,
    /// Media types accepted as images.
    #[serde(alias = "supportedImageTypes")]
    pub supported_image_types: Vec<String>,
    /// Extensions accepted as images.
    #[serde(alias = "supportedImageExtensions")]
    pub supported_image_extensions: Vec<String>,
    /// Media types accepted as documents.
    #[serde(alias = "supportedDocumentTypes")]
    pub supported_document_types: Vec<String>,
    /// Extensions accepted as documents.
    #[serde(alias = "supportedDocumentExtensions")]
    pub supported_document_extensions: Vec<String>,
}

/// Host key names and the fields they map to.
const HOST_KEYS: [(&str, &str); 12] = [
    ("enableImageProcessing", "enable_image_processing"),
    ("enableDocumentProcessing", "enable_document_processing"),
    ("imageQuality", "image_quality"),
    ("maxImageDimension", "max_image_dimension"),
    ("maxFileSize", "max_file_size"),
    ("enableAIReading", "enable_ai_reading"),
    ("showProcessingInfo", "show_processing_info"),
    ("enableLogging", "enable_logging"),
    ("supportedImageTypes", "supported_image_types"),
    ("supportedImageExtensions", "supported_image_extensions"),
    ("supportedDocumentTypes", "supported_document_types"),
    ("supportedDocumentExtensions", "supported_document_extensions"),
];

fn canonical_key(key: &str) -> &str {
    HOST_KEYS
        .iter()
        .find(|(host, _)| *host == key)
        .map_or(key, |(_, field)| *field)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            enable_image_processing: true,
            enable_document_processing: true,
            image_quality: 85,
            max_image_dimension: 2048,
            max_file_size: 20,
            enable_ai_reading: true,
            show_processing_info: false,
            enable_logging: false,
            supported_image_types: strings(&[
                "image/jpeg",
                "image/png",
                "image/gif",
                "image/webp",
                "image/bmp",
            ]),
            supported_image_extensions: strings(&["jpg", "jpeg", "png", "gif", "webp", "bmp"]),
            supported_document_types: strings(&[
                "text/plain",
                "application/json",
                "text/markdown",
                "text/csv",
                "text/html",
                "text/xml",
                "application/xml",
                "text/javascript",
                "application/javascript",
                "text/css",
                "application/rtf",
                "application/pdf",
            ]),
            supported_document_extensions: strings(&[
                "txt", "json", "md", "csv", "html", "xml", "js", "css", "rtf", "log", "conf",
                "config", "ini", "yaml", "yml", "pdf",
            ]),
        }
    }
}

impl MediaConfig {
    /// Size limit in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        u64::from(self.max_file_size) * BYTES_PER_MB
    }

    /// JPEG quality as a 0-1 fraction.
    pub fn quality_fraction(&self) -> f32 {
        f32::from(self.image_quality) / 100.0
    }

    /// Clamp numeric settings into the ranges the host UI allows.
    pub fn normalized(mut self) -> Self {
        self.image_quality = self.image_quality.clamp(10, 100);
        self.max_image_dimension = self.max_image_dimension.clamp(512, 4096);
        self.max_file_size = self.max_file_size.clamp(1, 100);
        for set in [
            &mut self.supported_image_types,
            &mut self.supported_image_extensions,
            &mut self.supported_document_types,
            &mut self.supported_document_extensions,
        ] {
            for item in set.iter_mut() {
                *item = item.trim().to_lowercase();
            }
        }
        self
    }

    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> MediaResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        let config: Self = match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| MediaError::Configuration(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| MediaError::Configuration(e.to_string()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| MediaError::Configuration(e.to_string()))?,
            _ => {
                return Err(MediaError::Configuration(
                    "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
                ))
            }
        };

        Ok(config.normalized())
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        fn flag(name: &str) -> Option<bool> {
            std::env::var(name).ok().map(|v| {
                matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
            })
        }

        fn number<T: std::str::FromStr>(name: &str) -> Option<T> {
            std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
        }

        if let Some(v) = flag("SMARTMEDIA_ENABLE_IMAGES") {
            config.enable_image_processing = v;
        }
        if let Some(v) = flag("SMARTMEDIA_ENABLE_DOCUMENTS") {
            config.enable_document_processing = v;
        }
        if let Some(v) = number("SMARTMEDIA_IMAGE_QUALITY") {
            config.image_quality = v;
        }
        if let Some(v) = number("SMARTMEDIA_MAX_IMAGE_DIMENSION") {
            config.max_image_dimension = v;
        }
        if let Some(v) = number("SMARTMEDIA_MAX_FILE_SIZE_MB") {
            config.max_file_size = v;
        }
        if let Some(v) = flag("SMARTMEDIA_AI_READING") {
            config.enable_ai_reading = v;
        }
        if let Some(v) = flag("SMARTMEDIA_SHOW_PROGRESS") {
            config.show_processing_info = v;
        }
        if let Some(v) = flag("SMARTMEDIA_LOGGING") {
            config.enable_logging = v;
        }

        config.normalized()
    }

    /// Merge persisted host settings over the defaults.
    ///
    /// Persisted keys may use the host's camelCase names or the field names.
    /// Both spell the same field, so they are folded onto the field name before
    /// merging; when a blob carries both, the one stored last wins. Unknown
    /// keys are ignored and missing keys keep their defaults. The raw persisted
    /// blob never leaves this function.
    pub fn load_merged(store: &dyn SettingsStore) -> MediaResult<Self> {
        let mut merged = match serde_json::to_value(Self::default())? {
            serde_json::Value::Object(map) => map,
            _ => return Err(MediaError::Internal("default config is not an object".to_string())),
        };

        if let Some(serde_json::Value::Object(persisted)) = store.load(MODULE_ID)? {
            for (key, value) in persisted {
                merged.insert(canonical_key(&key).to_string(), value);
            }
        }

        let config: Self = serde_json::from_value(serde_json::Value::Object(merged))
            .map_err(|e| MediaError::Configuration(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Persist this configuration under [`MODULE_ID`].
    pub fn save_to(&self, store: &dyn SettingsStore) -> MediaResult<()> {
        store.save(MODULE_ID, &serde_json::to_value(self)?)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> MediaConfigBuilder {
        MediaConfigBuilder::default()
    }
}

/// Builder for MediaConfig.
#[derive(Default)]
pub struct MediaConfigBuilder {
    config: MediaConfig,
}

impl MediaConfigBuilder {
    /// Toggle image processing.
    pub fn image_processing(mut self, enabled: bool) -> Self {
        self.config.enable_image_processing = enabled;
        self
    }

    /// Toggle document processing.
    pub fn document_processing(mut self, enabled: bool) -> Self {
        self.config.enable_document_processing = enabled;
        self
    }

    /// Set JPEG quality (10-100).
    pub fn image_quality(mut self, quality: u8) -> Self {
        self.config.image_quality = quality;
        self
    }

    /// Set the maximum image dimension in pixels.
    pub fn max_image_dimension(mut self, pixels: u32) -> Self {
        self.config.max_image_dimension = pixels;
        self
    }

    /// Set the size limit in megabytes.
    pub fn max_file_size(mut self, megabytes: u32) -> Self {
        self.config.max_file_size = megabytes;
        self
    }

    /// Toggle heuristic document analysis.
    pub fn ai_reading(mut self, enabled: bool) -> Self {
        self.config.enable_ai_reading = enabled;
        self
    }

    /// Toggle progress notifications.
    pub fn show_processing_info(mut self, enabled: bool) -> Self {
        self.config.show_processing_info = enabled;
        self
    }

    /// Toggle debug logging of stage decisions.
    pub fn logging(mut self, enabled: bool) -> Self {
        self.config.enable_logging = enabled;
        self
    }

    /// Replace the accepted image extensions.
    pub fn image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.supported_image_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the accepted document extensions.
    pub fn document_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.supported_document_extensions =
            extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Build the configuration without range clamping.
    ///
    /// Use [`MediaConfig::normalized`] to apply the host UI's ranges.
    pub fn build(self) -> MediaConfig {
        self.config
    }
}
