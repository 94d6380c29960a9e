//! Parsing of REPL input lines into messages and slash commands.

use crate::util::{parse_setting_key, resolve_model};
use crate::{ConfigStore, SettingKey, is_known_model};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    NewChat,
    /// Copy a transcript entry by its 1-based position, or the latest reply.
    Copy(Option<usize>),
    History,
    Settings,
    Set { key: String, value: String },
    Models,
    Help,
    Quit,
    Usage(&'static str),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Message(String),
    Command(ReplCommand),
}

/// Splits user input into a message or a command. A leading `//` sends a literal `/`.
pub fn parse_input(text: &str) -> ReplInput {
    let trimmed = text.trim_start();
    if let Some(literal) = trimmed.strip_prefix("//") {
        return ReplInput::Message(format!("/{literal}"));
    }

    let Some(command_line) = trimmed.strip_prefix('/') else {
        return ReplInput::Message(text.to_string());
    };

    let command_line = command_line.trim_end();
    let (name, rest) = match command_line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command_line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "new" | "reset" => ReplCommand::NewChat,
        "copy" if rest.is_empty() => ReplCommand::Copy(None),
        "copy" => match rest.parse::<usize>() {
            Ok(index) if index > 0 => ReplCommand::Copy(Some(index)),
            _ => ReplCommand::Usage("/copy [n]"),
        },
        "history" => ReplCommand::History,
        "settings" => ReplCommand::Settings,
        "set" => match rest.split_once(char::is_whitespace) {
            Some((key, value)) => ReplCommand::Set {
                key: key.to_string(),
                value: value.trim().to_string(),
            },
            None if !rest.is_empty() => ReplCommand::Set {
                key: rest.to_string(),
                value: String::new(),
            },
            None => ReplCommand::Usage("/set <key> <value>"),
        },
        "models" => ReplCommand::Models,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(name.to_string()),
    };

    ReplInput::Command(command)
}

/// Joins physical lines ending in `\` into one logical entry.
#[derive(Debug, Default)]
pub struct LineAssembler {
    pending: String,
    continuing: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) -> Option<String> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(head) = line.strip_suffix('\\') {
            self.pending.push_str(head);
            self.pending.push('\n');
            self.continuing = true;
            return None;
        }

        self.pending.push_str(line);
        self.continuing = false;
        Some(std::mem::take(&mut self.pending))
    }

    pub fn is_continuing(&self) -> bool {
        self.continuing
    }

    /// Flushes a continuation left open at end of input.
    pub fn finish(&mut self) -> Option<String> {
        self.continuing = false;
        let pending = std::mem::take(&mut self.pending);
        (!pending.trim().is_empty()).then_some(pending)
    }
}

/// Applies a textual `key value` change to `config` and returns the lines to report.
///
/// Model names may also be given as a 1-based catalog position.
pub async fn apply_setting(
    config: &ConfigStore,
    raw_key: &str,
    value: &str,
) -> Result<Vec<String>, String> {
    let Some(key) = parse_setting_key(raw_key) else {
        let known: Vec<&str> = SettingKey::ALL.iter().map(|key| key.as_str()).collect();
        return Err(format!(
            "Unknown setting '{raw_key}'. Known settings: {}",
            known.join(", ")
        ));
    };

    let value = match key {
        SettingKey::ModelName => resolve_model(value),
        _ => value.to_string(),
    };

    let settings = config
        .set_from_text(key, &value)
        .await
        .map_err(|error| format!("Failed to save settings: {}", error.message))?;

    let mut lines = vec![format!("{key} set to {}", settings.display_value(key))];
    if key == SettingKey::ModelName && !is_known_model(&settings.model_name) {
        lines.push(format!(
            "'{}' is not in the model catalog; the API may reject it.",
            settings.model_name
        ));
    }
    Ok(lines)
}
