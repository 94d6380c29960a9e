//! Unified facade over the parley workspace crates.
//!
//! This crate is the single dependency for embedding the chat client. It re-exports the
//! settings, transport, session and observability crates and provides runtime wiring for
//! the terminal front end in [`cli`].
//!
//! ```rust
//! use parley::prelude::*;
//!
//! let request = build_request("What changed?", &Settings::default());
//! assert_eq!(request.messages[0].role(), Role::System);
//! ```

pub mod cli;
pub mod prelude;
pub mod runtime;
pub mod transport;
pub mod util;

pub use pchat;
pub use pcommon;
pub use pconfig;
pub use pobserve;
pub use pprovider;

pub use pchat::{
    ChatError, ChatErrorKind, ChatSession, NoopSessionHooks, PendingExchange, SessionHooks,
    SessionPhase, TranscriptLog,
};
pub use pcommon::{BoxFuture, Generation, SessionId};
pub use pconfig::{
    AVAILABLE_MODELS, ConfigError, ConfigErrorKind, ConfigStore, DEFAULT_MODEL,
    FilesystemSettingsBackend, InMemorySettingsBackend, SettingKey, Settings, SettingsBackend,
    SettingsBackendConfig, create_settings_backend, default_settings_path, is_known_model,
};
pub use pobserve::{
    MetricsObservabilityHooks, SafeSessionHooks, SafeTransportHooks, StandardObservabilityHooks,
    TracingObservabilityHooks,
};
#[cfg(feature = "transport-http")]
pub use pprovider::{DEFAULT_BASE_URL, HttpTransport};
pub use pprovider::{
    ChatCompletion, ChatRequest, ChatTransport, NoopTransportHooks, ObservedTransport,
    ProviderError, ProviderErrorKind, Role, SecretString, TransportHooks, Turn, build_request,
};

pub use runtime::{
    RuntimeBundle, RuntimeError, RuntimeErrorKind, RuntimeOptions, build_runtime,
    build_runtime_with, chat_session, in_memory_config, open_config,
};
pub use transport::{TransportBuildConfig, build_default_transport, build_transport_with_config};
pub use util::{
    assistant_turn, parse_setting_key, resolve_model, system_turn, user_turn,
};
