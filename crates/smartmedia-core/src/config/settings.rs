//! Host settings persistence.
//!
//! The host owns a flat JSON object per module id. The core reads it only
//! through [`MediaConfig::load_merged`](super::MediaConfig::load_merged).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::error::{MediaError, MediaResult};

/// Read/write access to persisted settings keyed by module id.
pub trait SettingsStore: Send + Sync {
    /// Load the persisted object for a module, if any.
    fn load(&self, module_id: &str) -> MediaResult<Option<Value>>;

    /// Replace the persisted object for a module.
    fn save(&self, module_id: &str, settings: &Value) -> MediaResult<()>;
}

/// Settings kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self, module_id: &str) -> MediaResult<Option<Value>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| MediaError::Internal(format!("settings lock poisoned: {}", e)))?;
        Ok(entries.get(module_id).cloned())
    }

    fn save(&self, module_id: &str, settings: &Value) -> MediaResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| MediaError::Internal(format!("settings lock poisoned: {}", e)))?;
        entries.insert(module_id.to_string(), settings.clone());
        Ok(())
    }
}

/// Settings stored as one JSON object on disk, keyed by module id.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.smartmedia/settings.json`.
    pub fn default_location() -> MediaResult<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            MediaError::Configuration("could not determine home directory".to_string())
        })?;
        Ok(Self::new(home.join(".smartmedia").join("settings.json")))
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> MediaResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(MediaError::Configuration(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self, module_id: &str) -> MediaResult<Option<Value>> {
        Ok(self.read_all()?.remove(module_id))
    }

    fn save(&self, module_id: &str, settings: &Value) -> MediaResult<()> {
        let mut all = self.read_all()?;
        all.insert(module_id.to_string(), settings.clone());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(all))?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySettingsStore::new();
        assert!(store.load("m").unwrap().is_none());

        store.save("m", &json!({"imageQuality": 50})).unwrap();
        assert_eq!(store.load("m").unwrap(), Some(json!({"imageQuality": 50})));
    }

    #[test]
    fn test_file_store_keeps_other_modules() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("nested").join("settings.json"));

        store.save("other-module", &json!({"theme": "dark"})).unwrap();
        store.save("smart-media-assistant", &json!({"maxFileSize": 5})).unwrap();

        assert_eq!(
            store.load("other-module").unwrap(),
            Some(json!({"theme": "dark"}))
        );
        assert_eq!(
            store.load("smart-media-assistant").unwrap(),
            Some(json!({"maxFileSize": 5}))
        );
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("absent.json"));
        assert!(store.load("anything").unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let store = JsonFileSettingsStore::new(&path);
        assert!(matches!(store.load("m"), Err(MediaError::Configuration(_))));
    }
}
