//! Error types for smartmedia operations.
//!
//! Every failure carries a stable [`ErrorCode`] so hosts can branch on it
//! without parsing messages.

use smartmedia_extractors::ExtractError;
use thiserror::Error;

/// Result type alias for smartmedia operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Main error type for all smartmedia operations.
#[derive(Error, Debug)]
pub enum MediaError {
    /// The file handle is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The file exceeds the configured size limit.
    #[error("File too large: {file_name} is {size_bytes} bytes, limit is {limit_mb}MB")]
    FileTooLarge {
        file_name: String,
        size_bytes: u64,
        limit_mb: u32,
    },

    /// Classification does not match what was expected, or is unknown.
    #[error("Unsupported format: {message}")]
    UnsupportedFormat {
        message: String,
        file_name: String,
        media_type: String,
    },

    /// Image or document processing is switched off.
    #[error("{feature} processing is disabled")]
    FeatureDisabled { feature: &'static str },

    /// Image bytes could not be decoded.
    #[error("Image decode failed: {message}")]
    DecodeFailure { message: String },

    /// Document bytes could not be read as text.
    #[error("Read failed: {message}")]
    ReadFailure { message: String },

    /// Structured document did not parse.
    #[error("Parse failed: {message}")]
    ParseFailure { message: String },

    /// PDF text extraction failed.
    #[error("Extraction failed: {message}")]
    ExtractionFailure { message: String },

    /// Heuristic analysis failed. Attached to results, never raised past them.
    #[error("Analysis failed: {0}")]
    AnalysisFailure(String),

    /// Binary storage sink rejected the write.
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValInvalidInput,
    ValFileTooLarge,
    ValUnsupportedFormat,

    // Configuration (CFG_xxx)
    CfgFeatureDisabled,
    CfgInvalid,

    // Image (IMG_xxx)
    ImgDecodeFailed,

    // Document (DOC_xxx)
    DocReadFailed,
    DocParseFailed,
    DocExtractionFailed,

    // Analysis (ANA_xxx)
    AnaFailed,

    // Storage (STO_xxx)
    StoWriteFailed,

    // IO / serialization
    IoFailed,
    ParseInvalidJson,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValFileTooLarge => "VAL_002",
            ErrorCode::ValUnsupportedFormat => "VAL_003",
            ErrorCode::CfgFeatureDisabled => "CFG_001",
            ErrorCode::CfgInvalid => "CFG_002",
            ErrorCode::ImgDecodeFailed => "IMG_001",
            ErrorCode::DocReadFailed => "DOC_001",
            ErrorCode::DocParseFailed => "DOC_002",
            ErrorCode::DocExtractionFailed => "DOC_003",
            ErrorCode::AnaFailed => "ANA_001",
            ErrorCode::StoWriteFailed => "STO_001",
            ErrorCode::IoFailed => "IO_001",
            ErrorCode::ParseInvalidJson => "PARSE_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl MediaError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an unsupported format error.
    pub fn unsupported(
        message: impl Into<String>,
        file_name: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
            file_name: file_name.into(),
            media_type: media_type.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            message: message.into(),
        }
    }

    /// Create a read error.
    pub fn read(message: impl Into<String>) -> Self {
        Self::ReadFailure {
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseFailure {
            message: message.into(),
        }
    }

    /// Create an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::ExtractionFailure {
            message: message.into(),
        }
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::ValInvalidInput,
            Self::FileTooLarge { .. } => ErrorCode::ValFileTooLarge,
            Self::UnsupportedFormat { .. } => ErrorCode::ValUnsupportedFormat,
            Self::FeatureDisabled { .. } => ErrorCode::CfgFeatureDisabled,
            Self::Configuration(_) => ErrorCode::CfgInvalid,
            Self::DecodeFailure { .. } => ErrorCode::ImgDecodeFailed,
            Self::ReadFailure { .. } => ErrorCode::DocReadFailed,
            Self::ParseFailure { .. } => ErrorCode::DocParseFailed,
            Self::ExtractionFailure { .. } => ErrorCode::DocExtractionFailed,
            Self::AnalysisFailure(_) => ErrorCode::AnaFailed,
            Self::Storage { .. } => ErrorCode::StoWriteFailed,
            Self::Io(_) => ErrorCode::IoFailed,
            Self::Serialization(_) => ErrorCode::ParseInvalidJson,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::FileTooLarge { .. } => Some("Compress the file or raise maxFileSize"),
            Self::UnsupportedFormat { .. } => Some("Check supported_types() for accepted formats"),
            Self::FeatureDisabled { .. } => Some("Enable the feature in the plugin settings"),
            Self::ExtractionFailure { .. } => Some("The PDF may be scanned or image-based"),
            _ => None,
        }
    }

    /// Whether validation rejected the file before any processing started.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::FileTooLarge { .. } | Self::UnsupportedFormat { .. }
        )
    }
}

impl From<ExtractError> for MediaError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::InvalidUtf8(msg) => Self::read(msg),
            ExtractError::Io(e) => Self::read(e.to_string()),
            ExtractError::Json(msg) => Self::parse(msg),
            ExtractError::Pdf(msg)
            | ExtractError::EngineUnavailable(msg)
            | ExtractError::ExtractionFailed(msg) => Self::extraction(msg),
            ExtractError::Decode(msg) => Self::decode(msg),
            ExtractError::Encode(msg) => Self::Internal(format!("JPEG encoding failed: {}", msg)),
            ExtractError::UnsupportedType(ext) => {
                Self::unsupported(format!("no extractor for .{}", ext), "", "")
            }
            ExtractError::TaskJoin(e) => Self::Internal(format!("Task join error: {}", e)),
        }
    }
}
