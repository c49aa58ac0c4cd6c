//! File handle types.

use std::path::Path;
use std::sync::Arc;

use crate::error::MediaResult;

/// A user-supplied file as handed over by the host.
///
/// The pipeline never mutates a handle; clones share the byte buffer.
#[derive(Debug, Clone)]
pub struct FileHandle {
    /// Original file name, including extension.
    pub name: String,
    /// Media type declared by the host. May be empty.
    pub declared_media_type: String,
    /// Size reported by the host.
    pub size_bytes: u64,
    bytes: Arc<[u8]>,
}

impl FileHandle {
    /// Create a handle; the size is taken from the bytes.
    pub fn new(
        name: impl Into<String>,
        declared_media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            name: name.into(),
            declared_media_type: declared_media_type.into(),
            size_bytes: bytes.len() as u64,
            bytes: bytes.into(),
        }
    }

    /// Override the reported size.
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    /// Read a file from disk, guessing the media type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = guess_media_type(&name);
        Ok(Self::new(name, media_type, bytes))
    }

    /// Raw file content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Best guess at a media type from a file name's extension.
///
/// Returns an empty string for extensions without a well-known type.
pub fn guess_media_type(name: &str) -> &'static str {
    let ext = match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_lowercase(),
        None => return "",
    };

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "txt" | "log" | "conf" | "config" | "ini" => "text/plain",
        "json" => "application/json",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" => "text/html",
        "xml" => "application/xml",
        "js" => "text/javascript",
        "css" => "text/css",
        "rtf" => "application/rtf",
        "yaml" | "yml" => "application/yaml",
        "pdf" => "application/pdf",
        _ => "",
    }
}
