//! Wire-level chat types: roles, turns, the request body and the raw completion.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        };

        f.write_str(role)
    }
}

/// One message in a conversation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Body posted to the completions endpoint.
///
/// `None` numbers serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub temperature: Option<f64>,
    pub presence_penalty: Option<f64>,
    pub max_tokens: Option<i64>,
}

impl ChatRequest {
    /// The last user message in the request, if any.
    pub fn user_message(&self) -> Option<&Turn> {
        self.messages.iter().rev().find(|turn| turn.role() == Role::User)
    }
}

/// Parsed response body of a successful call.
///
/// Only `choices[0].message.content` is interpreted; everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    body: Value,
}

impl ChatCompletion {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Reply text, or `None` when it is missing, not a string, or empty.
    pub fn content(&self) -> Option<&str> {
        self.body
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
            .filter(|content| !content.is_empty())
    }

    pub fn model(&self) -> Option<&str> {
        self.body.get("model")?.as_str()
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

impl From<Value> for ChatCompletion {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}
