//! Classification types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Resolved kind of a file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileKind {
    Image,
    Document,
    #[default]
    Unknown,
}

/// Kind a caller requires when validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExpectedKind {
    Image,
    Document,
}

/// The image/document/unknown decision for one file.
///
/// Built only by the detector, so `is_image` and `is_document` always agree
/// with `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    kind: FileKind,
    is_image: bool,
    is_document: bool,
    name: String,
    declared_media_type: String,
    extension: String,
    size_bytes: u64,
}

impl Classification {
    pub(crate) fn new(
        kind: FileKind,
        name: impl Into<String>,
        declared_media_type: impl Into<String>,
        extension: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            kind,
            is_image: kind == FileKind::Image,
            is_document: kind == FileKind::Document,
            name: name.into(),
            declared_media_type: declared_media_type.into(),
            extension: extension.into(),
            size_bytes,
        }
    }

    pub(crate) fn unknown() -> Self {
        Self::new(FileKind::Unknown, "", "", "", 0)
    }

    /// Resolved kind.
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn is_image(&self) -> bool {
        self.is_image
    }

    pub fn is_document(&self) -> bool {
        self.is_document
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_media_type(&self) -> &str {
        &self.declared_media_type
    }

    /// Lowercased extension without the dot; empty when the name has none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_flags_follow_kind() {
        let c = Classification::new(FileKind::Image, "a.png", "image/png", "png", 1);
        assert!(c.is_image() && !c.is_document());

        let c = Classification::new(FileKind::Document, "a.txt", "text/plain", "txt", 1);
        assert!(!c.is_image() && c.is_document());

        let c = Classification::unknown();
        assert!(!c.is_image() && !c.is_document());
        assert_eq!(c.kind(), FileKind::Unknown);
    }

    #[test]
    fn test_file_kind_strings() {
        assert_eq!(FileKind::Document.to_string(), "document");
        assert_eq!(FileKind::from_str("image").unwrap(), FileKind::Image);
        assert_eq!(serde_json::to_string(&FileKind::Unknown).unwrap(), "\"unknown\"");
    }
}
