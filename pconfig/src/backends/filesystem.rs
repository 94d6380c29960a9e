use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use pcommon::BoxFuture;
use serde_json::Value;

use crate::backend::SettingsBackend;
use crate::error::ConfigError;

/// Stores the settings document as pretty-printed JSON in a single file.
#[derive(Debug)]
pub struct FilesystemSettingsBackend {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilesystemSettingsBackend {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        if path.is_dir() {
            return Err(ConfigError::storage(format!(
                "settings path '{}' is a directory",
                path.display()
            )));
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsBackend for FilesystemSettingsBackend {
    fn load_raw<'a>(&'a self) -> BoxFuture<'a, Result<Option<Value>, ConfigError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| ConfigError::storage("filesystem backend lock poisoned"))?;
            if !self.path.exists() {
                return Ok(None);
            }

            let bytes = fs::read(&self.path).map_err(|error| {
                ConfigError::storage(format!("failed to read settings file: {error}"))
            })?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(None);
            }

            let value = serde_json::from_slice::<Value>(&bytes).map_err(|error| {
                ConfigError::serialization(format!("failed to parse settings file: {error}"))
            })?;
            Ok(Some(value))
        })
    }

    fn save_raw<'a>(&'a self, value: Value) -> BoxFuture<'a, Result<(), ConfigError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| ConfigError::storage("filesystem backend lock poisoned"))?;
            let bytes = serde_json::to_vec_pretty(&value).map_err(|error| {
                ConfigError::serialization(format!("failed to serialize settings: {error}"))
            })?;

            write_atomic(&self.path, &bytes)
        })
    }
}

/// Resolves where settings live when no path is given.
///
/// `PARLEY_SETTINGS_PATH` wins, then the platform config directory, then a file in the
/// working directory.
pub fn default_settings_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os("PARLEY_SETTINGS_PATH") {
        return PathBuf::from(explicit);
    }

    if let Some(dirs) = ProjectDirs::from("", "", "parley") {
        return dirs.config_dir().join("settings.json");
    }

    PathBuf::from("parley-settings.json")
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| {
            ConfigError::storage(format!("failed to create settings directory: {error}"))
        })?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|error| {
        ConfigError::storage(format!("failed to write temporary settings file: {error}"))
    })?;

    // rename replaces the existing file in one step
    fs::rename(&tmp, path)
        .map_err(|error| ConfigError::storage(format!("failed to finalize settings file: {error}")))
}
