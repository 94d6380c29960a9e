//! Common imports for most parley applications.

pub use crate::{
    RuntimeBundle, RuntimeOptions, TransportBuildConfig, assistant_turn, build_runtime,
    build_runtime_with, build_transport_with_config, chat_session, in_memory_config,
    open_config, parse_setting_key, system_turn, user_turn,
};
pub use crate::{
    BoxFuture, ChatCompletion, ChatError, ChatErrorKind, ChatRequest, ChatSession,
    ChatTransport, ConfigError, ConfigStore, ProviderError, ProviderErrorKind, Role,
    SecretString, SessionHooks, SessionId, SessionPhase, SettingKey, Settings, TransportHooks,
    Turn, build_request,
};
