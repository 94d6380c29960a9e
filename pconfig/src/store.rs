//! Settings store: in-memory snapshot plus write-through persistence.

use std::sync::{Arc, Mutex};

use crate::backend::{InMemorySettingsBackend, SettingsBackend};
use crate::error::ConfigError;
use crate::settings::{SettingKey, Settings};

/// Holds the current [`Settings`] and persists every change through a [`SettingsBackend`].
///
/// Setters mutate the snapshot and save under one persistence lock, so the last write to
/// reach the backend is always the latest snapshot. A failed save leaves the new value in
/// memory and returns the error.
pub struct ConfigStore {
    backend: Arc<dyn SettingsBackend>,
    current: Mutex<Settings>,
    persist: tokio::sync::Mutex<()>,
}

impl ConfigStore {
    /// Creates a store holding the defaults. Call [`ConfigStore::load`] to read persisted state.
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self {
            backend,
            current: Mutex::new(Settings::default()),
            persist: tokio::sync::Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemorySettingsBackend::new()))
    }

    /// Creates a store and loads persisted settings into it.
    pub async fn open(backend: Arc<dyn SettingsBackend>) -> Result<Self, ConfigError> {
        let store = Self::new(backend);
        store.load().await?;
        Ok(store)
    }

    /// Reads the backend, merges the document over the defaults and replaces the snapshot.
    ///
    /// Waits for any in-flight save so the snapshot never falls behind the backend.
    pub async fn load(&self) -> Result<Settings, ConfigError> {
        let _persist = self.persist.lock().await;
        let raw = self.backend.load_raw().await?;
        let settings = Settings::from_persisted(raw)?;
        *self.lock_current()? = settings.clone();
        Ok(settings)
    }

    /// Persists `settings` in full and makes it the current snapshot.
    pub async fn save(&self, settings: Settings) -> Result<(), ConfigError> {
        let _persist = self.persist.lock().await;
        *self.lock_current()? = settings.clone();
        self.backend.save_raw(settings.to_persisted()?).await
    }

    pub fn snapshot(&self) -> Result<Settings, ConfigError> {
        Ok(self.lock_current()?.clone())
    }

    pub async fn set_api_key(&self, value: impl Into<String>) -> Result<(), ConfigError> {
        let value = value.into();
        self.update(|settings| settings.api_key = value).await
    }

    pub async fn set_model_name(&self, value: impl Into<String>) -> Result<(), ConfigError> {
        let value = value.into();
        self.update(|settings| settings.model_name = value).await
    }

    pub async fn set_temperature(&self, value: Option<f64>) -> Result<(), ConfigError> {
        self.update(|settings| settings.temperature = value).await
    }

    pub async fn set_presence_penalty(&self, value: Option<f64>) -> Result<(), ConfigError> {
        self.update(|settings| settings.presence_penalty = value).await
    }

    pub async fn set_max_tokens(&self, value: Option<i64>) -> Result<(), ConfigError> {
        self.update(|settings| settings.max_tokens = value).await
    }

    pub async fn set_system_prompt(&self, value: impl Into<String>) -> Result<(), ConfigError> {
        let value = value.into();
        self.update(|settings| settings.system_prompt = value).await
    }

    /// Applies typed text to one field and persists. Returns the resulting snapshot.
    pub async fn set_from_text(&self, key: SettingKey, text: &str) -> Result<Settings, ConfigError> {
        self.update(|settings| settings.apply_text(key, text)).await?;
        self.snapshot()
    }

    async fn update(&self, apply: impl FnOnce(&mut Settings)) -> Result<(), ConfigError> {
        let _persist = self.persist.lock().await;
        let settings = {
            let mut current = self.lock_current()?;
            apply(&mut current);
            current.clone()
        };
        self.backend.save_raw(settings.to_persisted()?).await
    }

    fn lock_current(&self) -> Result<std::sync::MutexGuard<'_, Settings>, ConfigError> {
        self.current
            .lock()
            .map_err(|_| ConfigError::storage("settings snapshot lock poisoned"))
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
