//! Binary storage sink.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{MediaError, MediaResult};

/// Persists base64-encoded binaries and returns an opaque reference.
#[async_trait]
pub trait BinaryStore: Send + Sync {
    /// Store `base64_content` as `{logical_path}/{unique_id}.{extension}`.
    async fn store(
        &self,
        base64_content: &str,
        logical_path: &str,
        unique_id: &str,
        extension: &str,
    ) -> MediaResult<String>;
}

fn reference(logical_path: &str, unique_id: &str, extension: &str) -> String {
    format!(
        "/{}/{}.{}",
        logical_path.trim_matches('/'),
        unique_id,
        extension
    )
}

/// Writes decoded binaries under a root directory.
#[derive(Debug, Clone)]
pub struct FsBinaryStore {
    root: PathBuf,
}

impl FsBinaryStore {
    /// Store rooted at `root`. Directories are created on demand.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BinaryStore for FsBinaryStore {
    async fn store(
        &self,
        base64_content: &str,
        logical_path: &str,
        unique_id: &str,
        extension: &str,
    ) -> MediaResult<String> {
        let bytes = STANDARD.decode(base64_content).map_err(|e| MediaError::Storage {
            message: "content is not valid base64".to_string(),
            source: Some(Box::new(e)),
        })?;

        let dir = self.root.join(logical_path.trim_matches('/'));
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| MediaError::Storage {
                message: format!("cannot create {}", dir.display()),
                source: Some(Box::new(e)),
            })?;

        let path = dir.join(format!("{}.{}", unique_id, extension));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| MediaError::Storage {
                message: format!("cannot write {}", path.display()),
                source: Some(Box::new(e)),
            })?;

        tracing::debug!(path = %path.display(), "Stored binary");
        Ok(reference(logical_path, unique_id, extension))
    }
}

/// Keeps decoded binaries in memory, keyed by reference.
#[derive(Debug, Default)]
pub struct MemoryBinaryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBinaryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored under a reference returned by [`BinaryStore::store`].
    pub fn get(&self, reference: &str) -> Option<Vec<u8>> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(reference).cloned())
    }

    /// Number of stored binaries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BinaryStore for MemoryBinaryStore {
    async fn store(
        &self,
        base64_content: &str,
        logical_path: &str,
        unique_id: &str,
        extension: &str,
    ) -> MediaResult<String> {
        let bytes = STANDARD.decode(base64_content).map_err(|e| MediaError::Storage {
            message: "content is not valid base64".to_string(),
            source: Some(Box::new(e)),
        })?;

        let key = reference(logical_path, unique_id, extension);
        let mut entries = self
            .entries
            .write()
            .map_err(|e| MediaError::storage(format!("store lock poisoned: {}", e)))?;
        entries.insert(key.clone(), bytes);
        Ok(key)
    }
}
