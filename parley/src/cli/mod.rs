//! Command-line interface parsing and handling.

pub mod clipboard;
pub mod commands;
pub mod render;
pub mod repl;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use crate::runtime::{RuntimeOptions, build_runtime, open_config};
use crate::transport::TransportBuildConfig;
use crate::{ChatError, default_settings_path};

pub use commands::{LineAssembler, ReplCommand, ReplInput, apply_setting, parse_input};
pub use repl::{CopyFn, Repl};

#[derive(Debug, Parser)]
#[command(name = "parley", version)]
#[command(about = "A terminal chat client for Perplexity-style chat-completion APIs")]
#[command(
    long_about = "Parley sends each message, together with your system prompt, to a \
chat-completion endpoint and prints the reply. Earlier turns are shown but never resent.\n\n\
Settings (API key, model, temperature, presence penalty, max tokens, system prompt) are \
stored as JSON in the platform config directory. Set PARLEY_SETTINGS_PATH or pass --config \
to use another file.\n\n\
Logging goes to stderr and is controlled by RUST_LOG (default: warn)."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings file to read and write
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the chat-completion API
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Abandon a request after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive chat (default)
    Chat,
    /// Send one message and print the reply
    Say {
        /// Message text; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        prompt: Vec<String>,
    },
    /// Show or change persisted settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the model catalog
    Models,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print every setting (the API key is masked)
    Show,
    /// Set one setting; an empty value clears text settings
    Set {
        /// Setting name, e.g. apiKey, model, temperature, max-tokens
        key: String,
        /// New value; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Print the settings file location
    Path,
}

impl Args {
    pub fn runtime_options(&self) -> RuntimeOptions {
        let mut transport = TransportBuildConfig::new();
        if let Some(base_url) = &self.base_url {
            transport = transport.with_base_url(base_url.clone());
        }
        if let Some(seconds) = self.timeout_secs {
            transport = transport.with_timeout(Duration::from_secs(seconds));
        }

        RuntimeOptions {
            settings_path: self.config.clone(),
            transport,
        }
    }
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let options = args.runtime_options();
    let mut stdout = std::io::stdout();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let bundle = build_runtime(options).await?;
            let settings = bundle.config.snapshot()?;
            render::banner(&mut stdout, &settings.model_name)?;
            if settings.api_key.is_empty() {
                render::notice(&mut stdout, "No API key set. Use /set apiKey <key> first.")?;
            }

            let stdin = BufReader::new(tokio::io::stdin());
            Repl::new(&bundle.session).run(stdin, &mut stdout).await?;
        }
        Commands::Say { prompt } => {
            let bundle = build_runtime(options).await?;
            let reply = bundle
                .session
                .submit(&prompt.join(" "))
                .await
                .map_err(|error: ChatError| error.message)?;
            writeln!(stdout, "{}", reply.content())?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, path) = open_config(options.settings_path).await?;
                writeln!(stdout, "Settings from {}", path.display())?;
                render::settings(&mut stdout, &config.snapshot()?)?;
            }
            ConfigAction::Set { key, value } => {
                let (config, _) = open_config(options.settings_path).await?;
                for line in apply_setting(&config, &key, &value.join(" ")).await? {
                    writeln!(stdout, "{line}")?;
                }
            }
            ConfigAction::Path => {
                let path = options.settings_path.unwrap_or_else(default_settings_path);
                writeln!(stdout, "{}", path.display())?;
            }
        },
        Commands::Models => {
            let current = match open_config(options.settings_path).await {
                Ok((config, _)) => config.snapshot().ok().map(|settings| settings.model_name),
                Err(error) => {
                    tracing::warn!(error = %error, "settings unavailable, listing catalog only");
                    None
                }
            };
            render::models(&mut stdout, current.as_deref())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn chat_is_the_default_command() {
        let args = Args::parse_from(["parley"]);
        assert!(args.command.is_none());

        let args = Args::parse_from(["parley", "chat", "--timeout-secs", "30"]);
        assert!(matches!(args.command, Some(Commands::Chat)));
        assert_eq!(
            args.runtime_options().transport.timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn global_flags_feed_runtime_options() {
        let args = Args::parse_from([
            "parley",
            "--config",
            "/tmp/parley.json",
            "--base-url",
            "http://localhost:9000",
            "models",
        ]);
        let options = args.runtime_options();

        assert_eq!(options.settings_path, Some(PathBuf::from("/tmp/parley.json")));
        assert_eq!(
            options.transport.base_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(options.transport.timeout, None);
    }

    #[test]
    fn say_joins_words_and_keeps_hyphens() {
        let args = Args::parse_from(["parley", "say", "what", "is", "-1", "squared?"]);
        let Some(Commands::Say { prompt }) = args.command else {
            panic!("expected say command");
        };
        assert_eq!(prompt.join(" "), "what is -1 squared?");
    }

    #[test]
    fn config_set_accepts_multi_word_and_empty_values() {
        let args = Args::parse_from(["parley", "config", "set", "systemPrompt", "Be", "brief."]);
        let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = args.command
        else {
            panic!("expected config set");
        };
        assert_eq!(key, "systemPrompt");
        assert_eq!(value.join(" "), "Be brief.");

        let args = Args::parse_from(["parley", "config", "set", "systemPrompt"]);
        assert!(matches!(
            args.command,
            Some(Commands::Config {
                action: ConfigAction::Set { ref value, .. }
            }) if value.is_empty()
        ));
    }

    #[test]
    fn say_requires_a_prompt() {
        assert!(Args::try_parse_from(["parley", "say"]).is_err());
    }
}
