//! Small convenience constructors and parsers.

use crate::{AVAILABLE_MODELS, Role, SettingKey, Turn};

pub fn system_turn(content: impl Into<String>) -> Turn {
    Turn::new(Role::System, content)
}

pub fn user_turn(content: impl Into<String>) -> Turn {
    Turn::new(Role::User, content)
}

pub fn assistant_turn(content: impl Into<String>) -> Turn {
    Turn::new(Role::Assistant, content)
}

pub fn parse_setting_key(value: &str) -> Option<SettingKey> {
    value.parse().ok()
}

/// Resolves a model by catalog name or by its 1-based position in the catalog.
pub fn resolve_model(value: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| AVAILABLE_MODELS.get(index))
        .map(|model| model.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
