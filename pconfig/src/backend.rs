//! Settings backend trait and in-memory backend implementation.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use pcommon::BoxFuture;
use serde_json::Value;

use crate::backends::filesystem::default_settings_path;
use crate::error::ConfigError;

pub use crate::backends::filesystem::FilesystemSettingsBackend;

/// Raw persistence for the settings document.
///
/// Backends store and return the document verbatim; merging over defaults happens in
/// [`crate::ConfigStore`].
pub trait SettingsBackend: Send + Sync {
    /// Returns the persisted document, or `None` when nothing has been saved yet.
    fn load_raw<'a>(&'a self) -> BoxFuture<'a, Result<Option<Value>, ConfigError>>;

    fn save_raw<'a>(&'a self, value: Value) -> BoxFuture<'a, Result<(), ConfigError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsBackendConfig {
    Filesystem { path: PathBuf },
    InMemory,
}

impl Default for SettingsBackendConfig {
    fn default() -> Self {
        Self::Filesystem {
            path: default_settings_path(),
        }
    }
}

pub fn create_settings_backend(
    config: SettingsBackendConfig,
) -> Result<Arc<dyn SettingsBackend>, ConfigError> {
    match config {
        SettingsBackendConfig::Filesystem { path } => {
            Ok(Arc::new(FilesystemSettingsBackend::new(path)?))
        }
        SettingsBackendConfig::InMemory => Ok(Arc::new(InMemorySettingsBackend::new())),
    }
}

pub fn create_default_settings_backend() -> Result<Arc<dyn SettingsBackend>, ConfigError> {
    create_settings_backend(SettingsBackendConfig::default())
}

#[derive(Debug, Default)]
pub struct InMemorySettingsBackend {
    value: Mutex<Option<Value>>,
    saves: Mutex<usize>,
}

impl InMemorySettingsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `value` already persisted.
    pub fn with_value(value: Value) -> Self {
        Self {
            value: Mutex::new(Some(value)),
            saves: Mutex::new(0),
        }
    }

    /// Latest persisted document, if any.
    pub fn persisted(&self) -> Option<Value> {
        self.value.lock().ok().and_then(|value| value.clone())
    }

    /// Number of completed `save_raw` calls.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|count| *count).unwrap_or_default()
    }
}

impl SettingsBackend for InMemorySettingsBackend {
    fn load_raw<'a>(&'a self) -> BoxFuture<'a, Result<Option<Value>, ConfigError>> {
        Box::pin(async move {
            let value = self
                .value
                .lock()
                .map_err(|_| ConfigError::storage("settings store lock poisoned"))?;
            Ok(value.clone())
        })
    }

    fn save_raw<'a>(&'a self, value: Value) -> BoxFuture<'a, Result<(), ConfigError>> {
        Box::pin(async move {
            *self
                .value
                .lock()
                .map_err(|_| ConfigError::storage("settings store lock poisoned"))? = Some(value);
            *self
                .saves
                .lock()
                .map_err(|_| ConfigError::storage("settings store lock poisoned"))? += 1;
            Ok(())
        })
    }
}
