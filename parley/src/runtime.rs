//! Runtime wiring: settings store, observed transport, and chat session.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;

use crate::transport::{TransportBuildConfig, build_transport_with_config};
use crate::{
    ChatSession, ChatTransport, ConfigError, ConfigStore, FilesystemSettingsBackend,
    ObservedTransport, ProviderError, SafeSessionHooks, SafeTransportHooks,
    StandardObservabilityHooks, default_settings_path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    Config,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub message: String,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::new(RuntimeErrorKind::Config, value.to_string())
    }
}

impl From<ProviderError> for RuntimeError {
    fn from(value: ProviderError) -> Self {
        Self::new(RuntimeErrorKind::Transport, value.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// Settings file; falls back to [`default_settings_path`].
    pub settings_path: Option<PathBuf>,
    pub transport: TransportBuildConfig,
}

#[derive(Clone)]
pub struct RuntimeBundle {
    pub config: Arc<ConfigStore>,
    pub session: Arc<ChatSession>,
    pub settings_path: Option<PathBuf>,
}

pub fn in_memory_config() -> Arc<ConfigStore> {
    Arc::new(ConfigStore::in_memory())
}

/// Opens the settings file at `path` (or the default location) and loads it.
pub async fn open_config(path: Option<PathBuf>) -> Result<(Arc<ConfigStore>, PathBuf), ConfigError> {
    let path = path.unwrap_or_else(default_settings_path);
    let backend = Arc::new(FilesystemSettingsBackend::new(&path)?);
    let store = ConfigStore::open(backend).await?;
    tracing::debug!(path = %path.display(), "settings loaded");
    Ok((Arc::new(store), path))
}

/// Builds a session over `config` and `transport` with panic-safe tracing and metrics hooks.
pub fn chat_session(config: Arc<ConfigStore>, transport: Arc<dyn ChatTransport>) -> ChatSession {
    let observed = ObservedTransport::new(
        transport,
        Arc::new(SafeTransportHooks::new(StandardObservabilityHooks::default())),
    );

    ChatSession::new(config, Arc::new(observed)).with_hooks(Arc::new(SafeSessionHooks::new(
        StandardObservabilityHooks::default(),
    )))
}

pub fn build_runtime_with(
    config: Arc<ConfigStore>,
    transport: Arc<dyn ChatTransport>,
) -> RuntimeBundle {
    let session = Arc::new(chat_session(Arc::clone(&config), transport));
    RuntimeBundle {
        config,
        session,
        settings_path: None,
    }
}

pub async fn build_runtime(options: RuntimeOptions) -> Result<RuntimeBundle, RuntimeError> {
    let (config, path) = open_config(options.settings_path).await?;
    let transport = build_transport_with_config(options.transport)?;

    let mut bundle = build_runtime_with(config, transport);
    bundle.settings_path = Some(path);
    Ok(bundle)
}
