//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use pcommon::Generation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidInput,
    Busy,
    Transport,
    NoContent,
    Stale,
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_input() -> Self {
        Self::new(ChatErrorKind::InvalidInput, "Please enter a message.")
    }

    pub fn busy() -> Self {
        Self::new(
            ChatErrorKind::Busy,
            "A response is still pending for this conversation.",
        )
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(
            ChatErrorKind::Transport,
            format!("Error fetching response: {}", message.into()),
        )
    }

    pub fn no_content() -> Self {
        Self::new(ChatErrorKind::NoContent, "No response from the chat API.")
    }

    pub fn stale(issued: Generation, current: Generation) -> Self {
        Self::new(
            ChatErrorKind::Stale,
            format!("response for conversation {issued} arrived after reset to {current}"),
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Config, message)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<pprovider::ProviderError> for ChatError {
    fn from(value: pprovider::ProviderError) -> Self {
        ChatError::transport(value.message)
    }
}

impl From<pconfig::ConfigError> for ChatError {
    fn from(value: pconfig::ConfigError) -> Self {
        ChatError::config(value.to_string())
    }
}
