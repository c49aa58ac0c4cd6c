//! File classification.
//!
//! Decides image/document/unknown from the declared media type and the file
//! extension against the configured sets. An extension alone never makes a
//! file an image; the declared type has to say so. When both readings match,
//! the extension breaks the tie.

use crate::config::MediaConfig;
use crate::types::{Classification, FileHandle, FileKind};

/// Lowercased text after the last `.`, or empty when there is none.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

fn contains(set: &[String], value: &str) -> bool {
    set.iter().any(|item| item == value)
}

/// Classify a file.
pub fn detect(file: Option<&FileHandle>, config: &MediaConfig) -> Classification {
    let file = match file {
        Some(f) if !f.name.is_empty() => f,
        _ => return Classification::unknown(),
    };

    let extension = extension_of(&file.name);
    let media_type = file.declared_media_type.trim().to_lowercase();

    let image_by_type = contains(&config.supported_image_types, &media_type)
        || media_type.starts_with("image/");
    let image_by_ext = contains(&config.supported_image_extensions, &extension);
    let is_image = image_by_type || (media_type.starts_with("image/") && image_by_ext);

    let document_by_type = contains(&config.supported_document_types, &media_type)
        || media_type.starts_with("text/")
        || media_type.contains("json")
        || media_type.contains("xml");
    let document_by_ext = contains(&config.supported_document_extensions, &extension);
    let is_document = document_by_type || document_by_ext;

    let kind = match (is_image, is_document) {
        (true, true) if image_by_ext => FileKind::Image,
        (true, true) => FileKind::Document,
        (true, false) => FileKind::Image,
        (false, true) => FileKind::Document,
        (false, false) => FileKind::Unknown,
    };

    if config.enable_logging {
        tracing::debug!(
            file = %file.name,
            media_type = %media_type,
            extension = %extension,
            image_by_type,
            image_by_ext,
            document_by_type,
            document_by_ext,
            kind = %kind,
            "Classified file"
        );
    } else {
        tracing::trace!(file = %file.name, kind = %kind, "Classified file");
    }

    Classification::new(
        kind,
        file.name.clone(),
        file.declared_media_type.clone(),
        extension,
        file.size_bytes,
    )
}

/// Whether a file classifies as a document.
pub fn is_document(file: Option<&FileHandle>, config: &MediaConfig) -> bool {
    detect(file, config).is_document()
}
