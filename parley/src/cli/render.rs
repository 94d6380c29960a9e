//! Plain-text rendering for the terminal front end.

use std::io::{self, Write};

use crate::{AVAILABLE_MODELS, Role, SettingKey, Settings, Turn};

pub fn banner<W: Write>(out: &mut W, model: &str) -> io::Result<()> {
    writeln!(out, "parley {} | model: {model}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        out,
        "Type a message and press Enter. End a line with \\ to continue it. /help lists commands."
    )
}

pub fn prompt<W: Write>(out: &mut W, continuing: bool) -> io::Result<()> {
    write!(out, "{}", if continuing { "...> " } else { "you> " })?;
    out.flush()
}

pub fn reply<W: Write>(out: &mut W, turn: &Turn) -> io::Result<()> {
    writeln!(out, "{}", turn.content())?;
    writeln!(out)
}

pub fn notice<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "! {message}")
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "you",
        Role::Assistant => "assistant",
    }
}

pub fn transcript<W: Write>(out: &mut W, turns: &[Turn]) -> io::Result<()> {
    if turns.is_empty() {
        return notice(out, "No messages yet.");
    }

    for (index, turn) in turns.iter().enumerate() {
        writeln!(out, "[{}] {}: {}", index + 1, role_label(turn.role()), turn.content())?;
    }
    Ok(())
}

pub fn settings<W: Write>(out: &mut W, settings: &Settings) -> io::Result<()> {
    for key in SettingKey::ALL {
        writeln!(
            out,
            "  {:<16} {:<36} {}",
            key.as_str(),
            settings.display_value(key),
            key.description()
        )?;
    }
    Ok(())
}

/// Lists the catalog with 1-based positions, marking `current` with `*`.
pub fn models<W: Write>(out: &mut W, current: Option<&str>) -> io::Result<()> {
    for (index, model) in AVAILABLE_MODELS.iter().enumerate() {
        let marker = if current == Some(*model) { '*' } else { ' ' };
        writeln!(out, "{marker} {}. {model}", index + 1)?;
    }

    if let Some(current) = current.filter(|name| !AVAILABLE_MODELS.contains(name)) {
        writeln!(out, "* {current} (custom)")?;
    }
    Ok(())
}

pub fn help<W: Write>(out: &mut W) -> io::Result<()> {
    const COMMANDS: [(&str, &str); 8] = [
        ("/new", "start a new chat and reload settings"),
        ("/copy [n]", "copy message n (default: latest reply) to the clipboard"),
        ("/history", "show the current transcript"),
        ("/settings", "show the current settings"),
        ("/set <key> <value>", "change a setting"),
        ("/models", "list the model catalog"),
        ("/help", "show this list"),
        ("/quit", "leave the chat"),
    ];

    for (command, description) in COMMANDS {
        writeln!(out, "  {command:<20} {description}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        write(&mut out).expect("rendering into a Vec should not fail");
        String::from_utf8(out).expect("output should be utf-8")
    }

    #[test]
    fn transcript_numbers_turns_from_one() {
        let text = rendered(|out| {
            transcript(out, &[Turn::user("hello"), Turn::assistant("hi there")])
        });

        assert_eq!(text, "[1] you: hello\n[2] assistant: hi there\n");
    }

    #[test]
    fn empty_transcript_prints_notice() {
        assert_eq!(rendered(|out| transcript(out, &[])), "! No messages yet.\n");
    }

    #[test]
    fn settings_listing_masks_api_key() {
        let settings = Settings {
            api_key: "pplx-1234567890".to_string(),
            ..Settings::default()
        };
        let text = rendered(|out| super::settings(out, &settings));

        assert!(text.contains("****7890"));
        assert!(!text.contains("pplx-1234567890"));
        assert_eq!(text.lines().count(), SettingKey::ALL.len());
    }

    #[test]
    fn models_marks_current_and_custom_names() {
        let text = rendered(|out| models(out, Some(AVAILABLE_MODELS[1])));
        assert!(text.contains(&format!("* 2. {}", AVAILABLE_MODELS[1])));
        assert_eq!(text.matches('*').count(), 1);

        let custom = rendered(|out| models(out, Some("my-finetune")));
        assert!(custom.ends_with("* my-finetune (custom)\n"));
    }

    #[test]
    fn prompt_switches_for_continuations() {
        assert_eq!(rendered(|out| prompt(out, false)), "you> ");
        assert_eq!(rendered(|out| prompt(out, true)), "...> ");
    }
}
