//! Request materialization from the current settings snapshot.
//!
//! ```rust
//! use pconfig::Settings;
//! use pprovider::{Role, build_request};
//!
//! let request = build_request("  What is Rust?  ", &Settings::default());
//!
//! assert_eq!(request.messages.len(), 2);
//! assert_eq!(request.messages[0].role(), Role::System);
//! assert_eq!(request.messages[1].content(), "What is Rust?");
//! ```

use pconfig::Settings;

use crate::types::{ChatRequest, Turn};

/// Builds the body for one exchange: the system prompt followed by the trimmed user text.
///
/// Numeric settings pass through untouched, including `None`.
pub fn build_request(user_message: &str, settings: &Settings) -> ChatRequest {
    ChatRequest {
        model: settings.model_name.clone(),
        messages: vec![
            Turn::system(settings.system_prompt.clone()),
            Turn::user(user_message.trim()),
        ],
        temperature: settings.temperature,
        presence_penalty: settings.presence_penalty,
        max_tokens: settings.max_tokens,
    }
}
