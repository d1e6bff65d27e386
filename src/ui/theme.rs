//! Theme Preference
//!
//! The dark-mode switch, persisted in a small key/value store. Read once
//! when created, written on every change. Whoever needs it gets the
//! [`DarkMode`] value passed in; there is no global.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage key for the dark-mode flag
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to access preferences at {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse preferences at {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// String key/value storage for client preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// In-memory store, for callers that don't persist
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in one file
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl FilePreferenceStore {
    /// Open the store, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values: Map<String, Value> = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| PreferenceError::Parse {
                path: path.clone(),
                error: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                return Err(PreferenceError::Io {
                    path,
                    error: e.to_string(),
                })
            }
        };
        Ok(Self { path, values })
    }

    /// `<config dir>/picko/preferences.json`, or the working directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("picko").join("preferences.json"))
            .unwrap_or_else(|| PathBuf::from("./picko-preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), PreferenceError> {
        let io_error = |e: std::io::Error| PreferenceError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.values).map_err(|e| {
            PreferenceError::Parse {
                path: self.path.clone(),
                error: e.to_string(),
            }
        })?;
        std::fs::write(&self.path, content).map_err(io_error)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        self.save()
    }
}

/// Dark-mode preference bound to its store
#[derive(Debug)]
pub struct DarkMode<S: PreferenceStore> {
    store: S,
    enabled: bool,
}

impl<S: PreferenceStore> DarkMode<S> {
    /// Read the stored value; anything but `"true"` means off
    pub fn load(store: S) -> Self {
        let enabled = store.get(DARK_MODE_KEY).as_deref() == Some("true");
        Self { store, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set(&mut self, enabled: bool) -> Result<bool, PreferenceError> {
        self.store.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })?;
        self.enabled = enabled;
        Ok(enabled)
    }

    pub fn toggle(&mut self) -> Result<bool, PreferenceError> {
        self.set(!self.enabled)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
