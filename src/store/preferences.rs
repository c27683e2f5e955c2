//! Preference storage
//!
//! A small synchronous key-value store for the display mode preference.
//! Two backends:
//! - `MemoryPreferences`: process-local map, used for tests and ephemeral sessions
//! - `FilePreferences`: JSON object on disk, the local-storage equivalent for
//!   native builds

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::{ThemeError, ThemeResult};

/// Key under which the display mode is persisted
pub const DISPLAY_MODE_KEY: &str = "moodThemeMode";

/// Synchronous string key-value storage
pub trait PreferenceStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> ThemeResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> ThemeResult<()>;

    /// Delete a value; absent keys are not an error
    fn remove(&self, key: &str) -> ThemeResult<()>;
}

/// In-memory preference store
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: seed a value
    pub fn with(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> ThemeResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| ThemeError::Lock(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| ThemeError::Lock(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ThemeResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| ThemeError::Lock(e.to_string()))?;
        values.remove(key);
        Ok(())
    }
}

/// JSON-file preference store
///
/// The whole file is a flat JSON object of string values. It is re-read on
/// every access so several processes sharing the file see each other's writes.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load from JSON file
    fn load(&self) -> ThemeResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let values: BTreeMap<String, String> = serde_json::from_str(&content)?;
        Ok(values)
    }

    /// Save to JSON file
    fn save(&self, values: &BTreeMap<String, String>) -> ThemeResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Existing values, or an empty map if the file is unreadable
    fn load_or_reset(&self) -> BTreeMap<String, String> {
        match self.load() {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Discarding unreadable preferences file");
                BTreeMap::new()
            }
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> ThemeResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        let mut values = self.load_or_reset();
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> ThemeResult<()> {
        let mut values = self.load_or_reset();
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}
