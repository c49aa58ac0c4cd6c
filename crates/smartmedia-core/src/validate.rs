//! Pre-processing validation.

use crate::config::MediaConfig;
use crate::detect::detect;
use crate::error::{MediaError, MediaResult};
use crate::types::{Classification, ExpectedKind, FileHandle, FileKind};

/// Check a file against the size limit and, optionally, a required kind.
///
/// Runs before any side effect; on success returns the classification.
pub fn validate(
    file: Option<&FileHandle>,
    expected: Option<ExpectedKind>,
    config: &MediaConfig,
) -> MediaResult<Classification> {
    let file = match file {
        Some(f) if !f.name.is_empty() => f,
        Some(_) => return Err(MediaError::invalid_input("file has no name")),
        None => return Err(MediaError::invalid_input("no file provided")),
    };

    if file.size_bytes > config.max_file_size_bytes() {
        return Err(MediaError::FileTooLarge {
            file_name: file.name.clone(),
            size_bytes: file.size_bytes,
            limit_mb: config.max_file_size,
        });
    }

    let classification = detect(Some(file), config);
    let declared = if file.declared_media_type.is_empty() {
        "unknown"
    } else {
        file.declared_media_type.as_str()
    };

    match expected {
        Some(ExpectedKind::Image) if !classification.is_image() => Err(MediaError::unsupported(
            format!("{} is not a supported image ({})", file.name, declared),
            &file.name,
            declared,
        )),
        Some(ExpectedKind::Document) if !classification.is_document() => {
            Err(MediaError::unsupported(
                format!("{} is not a supported document ({})", file.name, declared),
                &file.name,
                declared,
            ))
        }
        None if classification.kind() == FileKind::Unknown => Err(MediaError::unsupported(
            format!("{} has an unsupported file type ({})", file.name, declared),
            &file.name,
            declared,
        )),
        _ => Ok(classification),
    }
}
