//! Settings value, defaults, and the lenient parsing used for persisted and typed input.
//!
//! ```rust
//! use pconfig::{SettingKey, Settings};
//!
//! let mut settings = Settings::default();
//! settings.apply_text(SettingKey::Temperature, "0.7");
//! settings.apply_text(SettingKey::MaxTokens, "not a number");
//!
//! assert_eq!(settings.temperature, Some(0.7));
//! assert_eq!(settings.max_tokens, None);
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::models::DEFAULT_MODEL;

pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_PRESENCE_PENALTY: f64 = 0.0;
pub const DEFAULT_MAX_TOKENS: i64 = 1000;

/// Persisted conversation configuration.
///
/// Numeric fields hold `None` when the stored value is not a usable number. They are kept
/// as-is and forwarded to requests as JSON `null`; nothing here clamps or rejects ranges.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(deserialize_with = "lenient_string")]
    pub api_key: String,
    #[serde(deserialize_with = "lenient_string")]
    pub model_name: String,
    #[serde(deserialize_with = "lenient_float")]
    pub temperature: Option<f64>,
    #[serde(deserialize_with = "lenient_float")]
    pub presence_penalty: Option<f64>,
    #[serde(deserialize_with = "lenient_integer")]
    pub max_tokens: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub system_prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model_name: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            presence_penalty: Some(DEFAULT_PRESENCE_PENALTY),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            system_prompt: String::new(),
        }
    }
}

impl Settings {
    /// Merges a persisted value over the defaults.
    ///
    /// Keys present in the persisted object win, missing keys keep their default, unknown
    /// keys are ignored. Anything other than a JSON object yields the defaults.
    pub fn from_persisted(value: Option<Value>) -> Result<Self, ConfigError> {
        match value {
            Some(Value::Object(map)) => serde_json::from_value(Value::Object(map)).map_err(
                |error| ConfigError::serialization(format!("failed to decode settings: {error}")),
            ),
            _ => Ok(Self::default()),
        }
    }

    pub fn to_persisted(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|error| {
            ConfigError::serialization(format!("failed to encode settings: {error}"))
        })
    }

    /// Applies the text a user typed into the field named by `key`.
    ///
    /// Float fields take the leading decimal number of the input and integer fields the
    /// leading integer; input with no leading number stores `None`.
    pub fn apply_text(&mut self, key: SettingKey, text: &str) {
        match key {
            SettingKey::ApiKey => self.api_key = text.to_string(),
            SettingKey::ModelName => self.model_name = text.to_string(),
            SettingKey::Temperature => self.temperature = parse_float_prefix(text),
            SettingKey::PresencePenalty => self.presence_penalty = parse_float_prefix(text),
            SettingKey::MaxTokens => self.max_tokens = parse_int_prefix(text),
            SettingKey::SystemPrompt => self.system_prompt = text.to_string(),
        }
    }

    /// Renders one field for display. Unusable numbers render as `NaN`; the API key is masked.
    pub fn display_value(&self, key: SettingKey) -> String {
        match key {
            SettingKey::ApiKey => self.masked_api_key(),
            SettingKey::ModelName => self.model_name.clone(),
            SettingKey::Temperature => display_number(self.temperature),
            SettingKey::PresencePenalty => display_number(self.presence_penalty),
            SettingKey::MaxTokens => self
                .max_tokens
                .map(|value| value.to_string())
                .unwrap_or_else(|| "NaN".to_string()),
            SettingKey::SystemPrompt => self.system_prompt.clone(),
        }
    }

    pub fn masked_api_key(&self) -> String {
        let count = self.api_key.chars().count();
        if count == 0 {
            return "(not set)".to_string();
        }

        if count <= 4 {
            return "*".repeat(count);
        }

        let tail: String = self.api_key.chars().skip(count - 4).collect();
        format!("****{tail}")
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"[REDACTED]")
            .field("model_name", &self.model_name)
            .field("temperature", &self.temperature)
            .field("presence_penalty", &self.presence_penalty)
            .field("max_tokens", &self.max_tokens)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    ApiKey,
    ModelName,
    Temperature,
    PresencePenalty,
    MaxTokens,
    SystemPrompt,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::ApiKey,
        SettingKey::ModelName,
        SettingKey::Temperature,
        SettingKey::PresencePenalty,
        SettingKey::MaxTokens,
        SettingKey::SystemPrompt,
    ];

    /// Persisted key name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "apiKey",
            Self::ModelName => "modelName",
            Self::Temperature => "temperature",
            Self::PresencePenalty => "presencePenalty",
            Self::MaxTokens => "maxTokens",
            Self::SystemPrompt => "systemPrompt",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ApiKey => "API key sent as the bearer token",
            Self::ModelName => "Model used for completions",
            Self::Temperature => "Controls randomness in the response (0 to 2)",
            Self::PresencePenalty => "Penalizes tokens already present in the text (-2 to 2)",
            Self::MaxTokens => "The maximum number of tokens to generate",
            Self::SystemPrompt => "Instruction sent ahead of every message",
        }
    }
}

impl Display for SettingKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| *ch != '_' && *ch != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "apikey" => Ok(Self::ApiKey),
            "modelname" | "model" => Ok(Self::ModelName),
            "temperature" => Ok(Self::Temperature),
            "presencepenalty" => Ok(Self::PresencePenalty),
            "maxtokens" => Ok(Self::MaxTokens),
            "systemprompt" => Ok(Self::SystemPrompt),
            _ => Err(ConfigError::invalid_key(format!(
                "unknown setting '{}'",
                value.trim()
            ))),
        }
    }
}

/// Parses the leading decimal number of `text`, ignoring leading whitespace and any
/// trailing garbage. Returns `None` when there is no leading number or it is not finite.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }

        if digits + (frac_end - frac_start) > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }

        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }

        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses the leading integer of `text`; `"12.7"` yields `12`, `"abc"` yields `None`.
///
/// Integers beyond the `i64` range saturate to `i64::MAX` or `i64::MIN`.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    if end == digits_start {
        return None;
    }

    match trimmed[..end].parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) if bytes[0] == b'-' => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

fn display_number(value: Option<f64>) -> String {
    value
        .map(|number| number.to_string())
        .unwrap_or_else(|| "NaN".to_string())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Number(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        _ => String::new(),
    })
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(value) => value.as_f64().filter(|number| number.is_finite()),
        Value::String(value) => parse_float_prefix(&value),
        _ => None,
    })
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(value) => value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|number| number.is_finite())
                .map(|number| number.trunc() as i64)
        }),
        Value::String(value) => parse_int_prefix(&value),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ConfigErrorKind;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.api_key, "");
        assert_eq!(settings.model_name, "llama-3.1-sonar-small-128k-online");
        assert_eq!(settings.temperature, Some(0.2));
        assert_eq!(settings.presence_penalty, Some(0.0));
        assert_eq!(settings.max_tokens, Some(1000));
        assert_eq!(settings.system_prompt, "");
    }

    #[test]
    fn from_persisted_overlays_present_keys_and_ignores_unknown_ones() {
        let settings = Settings::from_persisted(Some(json!({
            "apiKey": "pplx-abc",
            "temperature": 1.1,
            "somethingElse": true
        })))
        .expect("settings should decode");

        assert_eq!(settings.api_key, "pplx-abc");
        assert_eq!(settings.temperature, Some(1.1));
        assert_eq!(settings.model_name, "llama-3.1-sonar-small-128k-online");
        assert_eq!(settings.max_tokens, Some(1000));
    }

    #[test]
    fn from_persisted_keeps_malformed_numbers_as_none() {
        let settings = Settings::from_persisted(Some(json!({
            "temperature": null,
            "presencePenalty": "abc",
            "maxTokens": "256 tokens",
            "systemPrompt": null
        })))
        .expect("settings should decode");

        assert_eq!(settings.temperature, None);
        assert_eq!(settings.presence_penalty, None);
        assert_eq!(settings.max_tokens, Some(256));
        assert_eq!(settings.system_prompt, "");
    }

    #[test]
    fn from_persisted_falls_back_to_defaults_for_non_objects() {
        assert_eq!(
            Settings::from_persisted(None).expect("none decodes"),
            Settings::default()
        );
        assert_eq!(
            Settings::from_persisted(Some(json!([1, 2, 3]))).expect("array decodes"),
            Settings::default()
        );
        assert_eq!(
            Settings::from_persisted(Some(json!(null))).expect("null decodes"),
            Settings::default()
        );
    }

    #[test]
    fn to_persisted_uses_camel_case_keys_and_null_for_unusable_numbers() {
        let mut settings = Settings::default();
        settings.temperature = None;

        let value = settings.to_persisted().expect("settings should encode");
        assert_eq!(
            value,
            json!({
                "apiKey": "",
                "modelName": "llama-3.1-sonar-small-128k-online",
                "temperature": null,
                "presencePenalty": 0.0,
                "maxTokens": 1000,
                "systemPrompt": ""
            })
        );
    }

    #[test]
    fn parse_float_prefix_reads_leading_number_only() {
        assert_eq!(parse_float_prefix("0.7"), Some(0.7));
        assert_eq!(parse_float_prefix("  1.5abc"), Some(1.5));
        assert_eq!(parse_float_prefix("-2"), Some(-2.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("3e2 units"), Some(300.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("NaN"), None);
        assert_eq!(parse_float_prefix("inf"), None);
    }

    #[test]
    fn parse_int_prefix_reads_leading_integer_only() {
        assert_eq!(parse_int_prefix("1000"), Some(1000));
        assert_eq!(parse_int_prefix(" 12.7"), Some(12));
        assert_eq!(parse_int_prefix("-5"), Some(-5));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("+"), None);
        assert_eq!(parse_int_prefix("99999999999999999999 tokens"), Some(i64::MAX));
        assert_eq!(parse_int_prefix("-99999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn apply_text_stores_none_for_non_numeric_input() {
        let mut settings = Settings::default();
        settings.apply_text(SettingKey::Temperature, "warm");
        settings.apply_text(SettingKey::PresencePenalty, "-1.5");
        settings.apply_text(SettingKey::MaxTokens, "");
        settings.apply_text(SettingKey::SystemPrompt, "Be terse.");

        assert_eq!(settings.temperature, None);
        assert_eq!(settings.presence_penalty, Some(-1.5));
        assert_eq!(settings.max_tokens, None);
        assert_eq!(settings.system_prompt, "Be terse.");
        assert_eq!(settings.display_value(SettingKey::Temperature), "NaN");
        assert_eq!(settings.display_value(SettingKey::MaxTokens), "NaN");
    }

    #[test]
    fn setting_key_parses_persisted_and_snake_case_names() {
        assert_eq!("apiKey".parse::<SettingKey>(), Ok(SettingKey::ApiKey));
        assert_eq!("max_tokens".parse::<SettingKey>(), Ok(SettingKey::MaxTokens));
        assert_eq!(
            "presence-penalty".parse::<SettingKey>(),
            Ok(SettingKey::PresencePenalty)
        );
        assert_eq!("model".parse::<SettingKey>(), Ok(SettingKey::ModelName));

        let error = "colour".parse::<SettingKey>().expect_err("unknown key must fail");
        assert_eq!(error.kind, ConfigErrorKind::InvalidKey);

        for key in SettingKey::ALL {
            assert_eq!(key.as_str().parse::<SettingKey>(), Ok(key));
        }
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut settings = Settings::default();
        settings.api_key = "pplx-secret-value".to_string();

        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("pplx-secret-value"));
        assert!(rendered.contains("[REDACTED]"));
        assert_eq!(settings.masked_api_key(), "****alue");
    }
}
