//! Line-oriented interactive chat loop.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::clipboard::copy_to_clipboard;
use super::commands::{LineAssembler, ReplCommand, ReplInput, apply_setting, parse_input};
use super::render;
use crate::{ChatSession, Role};

pub type CopyFn = fn(&str) -> Result<(), String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Drives a [`ChatSession`] from line input, writing replies and notices to `out`.
pub struct Repl<'a> {
    session: &'a ChatSession,
    copy: CopyFn,
}

impl<'a> Repl<'a> {
    pub fn new(session: &'a ChatSession) -> Self {
        Self {
            session,
            copy: copy_to_clipboard,
        }
    }

    pub fn with_clipboard(mut self, copy: CopyFn) -> Self {
        self.copy = copy;
        self
    }

    /// Reads entries until `/quit` or end of input.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut assembler = LineAssembler::new();

        loop {
            render::prompt(out, assembler.is_continuing())?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let Some(entry) = assembler.push(&line) else {
                continue;
            };

            if self.handle(entry, out).await? == Flow::Quit {
                return Ok(());
            }
        }

        if let Some(entry) = assembler.finish() {
            self.handle(entry, out).await?;
        }
        writeln!(out)
    }

    async fn handle<W: Write>(&self, entry: String, out: &mut W) -> io::Result<Flow> {
        match parse_input(&entry) {
            ReplInput::Message(message) => {
                self.send(message, out).await?;
                Ok(Flow::Continue)
            }
            ReplInput::Command(command) => self.command(command, out).await,
        }
    }

    async fn send<W: Write>(&self, mut message: String, out: &mut W) -> io::Result<()> {
        match self.session.submit_input(&mut message).await {
            Ok(turn) => render::reply(out, &turn),
            Err(error) => {
                tracing::debug!(kind = ?error.kind, "exchange not delivered");
                render::notice(out, &error.message)
            }
        }
    }

    async fn command<W: Write>(&self, command: ReplCommand, out: &mut W) -> io::Result<Flow> {
        match command {
            ReplCommand::NewChat => match self.session.reset().await {
                Ok(()) => render::notice(out, "Started a new chat.")?,
                Err(error) => render::notice(
                    out,
                    &format!(
                        "Started a new chat, but settings could not be reloaded: {}",
                        error.message
                    ),
                )?,
            },
            ReplCommand::Copy(index) => self.copy_message(index, out)?,
            ReplCommand::History => render::transcript(out, &self.session.transcript())?,
            ReplCommand::Settings => match self.session.config().snapshot() {
                Ok(settings) => render::settings(out, &settings)?,
                Err(error) => render::notice(out, &error.message)?,
            },
            ReplCommand::Set { key, value } => {
                match apply_setting(self.session.config(), &key, &value).await {
                    Ok(lines) => {
                        for line in lines {
                            render::notice(out, &line)?;
                        }
                    }
                    Err(message) => render::notice(out, &message)?,
                }
            }
            ReplCommand::Models => {
                let current = self
                    .session
                    .config()
                    .snapshot()
                    .ok()
                    .map(|settings| settings.model_name);
                render::models(out, current.as_deref())?;
            }
            ReplCommand::Help => render::help(out)?,
            ReplCommand::Quit => return Ok(Flow::Quit),
            ReplCommand::Usage(usage) => render::notice(out, &format!("Usage: {usage}"))?,
            ReplCommand::Unknown(name) => render::notice(
                out,
                &format!("Unknown command '/{name}'. Type /help for a list."),
            )?,
        }
        Ok(Flow::Continue)
    }

    fn copy_message<W: Write>(&self, index: Option<usize>, out: &mut W) -> io::Result<()> {
        let transcript = self.session.transcript();
        let selected = match index {
            Some(index) => index.checked_sub(1).and_then(|index| transcript.get(index)),
            None => transcript
                .iter()
                .rev()
                .find(|turn| turn.role() == Role::Assistant),
        };

        let Some(turn) = selected else {
            let message = match index {
                Some(index) => format!("No message #{index}."),
                None => "Nothing to copy yet.".to_string(),
            };
            return render::notice(out, &message);
        };

        match (self.copy)(turn.content()) {
            Ok(()) => render::notice(out, "Message copied to clipboard!"),
            Err(error) => render::notice(out, &format!("Copy failed: {error}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::{BoxFuture, ChatCompletion, ChatRequest, ChatTransport, ProviderError, SecretString};

    struct EchoTransport;

    impl ChatTransport for EchoTransport {
        fn send<'a>(
            &'a self,
            request: ChatRequest,
            _credentials: SecretString,
        ) -> BoxFuture<'a, Result<ChatCompletion, ProviderError>> {
            Box::pin(async move {
                let text = request
                    .user_message()
                    .map(|turn| format!("echo: {}", turn.content()));
                Ok(ChatCompletion::new(json!({
                    "choices": [{ "message": { "content": text } }]
                })))
            })
        }
    }

    static COPIED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    fn capture_copy(text: &str) -> Result<(), String> {
        COPIED
            .lock()
            .expect("copied lock")
            .push(text.to_string());
        Ok(())
    }

    fn failing_copy(_text: &str) -> Result<(), String> {
        Err("no clipboard".to_string())
    }

    async fn run_script(repl: &Repl<'_>, script: &str) -> String {
        let mut out = Vec::new();
        repl.run(script.as_bytes(), &mut out)
            .await
            .expect("repl should run");
        String::from_utf8(out).expect("output should be utf-8")
    }

    fn session() -> ChatSession {
        ChatSession::new(crate::in_memory_config(), Arc::new(EchoTransport))
    }

    #[tokio::test]
    async fn copy_defaults_to_latest_reply() {
        let session = session();
        let repl = Repl::new(&session).with_clipboard(capture_copy);

        let output = run_script(&repl, "hello there\n/copy\n/quit\n").await;

        assert!(output.contains("! Message copied to clipboard!"));
        assert!(
            COPIED
                .lock()
                .expect("copied lock")
                .contains(&"echo: hello there".to_string())
        );
    }

    #[tokio::test]
    async fn copy_reports_missing_entries_and_failures() {
        let session = session();
        let output = run_script(
            &Repl::new(&session).with_clipboard(failing_copy),
            "/copy\n/copy 4\nhi\n/copy 1\n",
        )
        .await;

        assert!(output.contains("! Nothing to copy yet."));
        assert!(output.contains("! No message #4."));
        assert!(output.contains("! Copy failed: no clipboard"));
    }

    #[tokio::test]
    async fn unknown_commands_and_bad_usage_are_reported() {
        let session = session();
        let output = run_script(
            &Repl::new(&session).with_clipboard(failing_copy),
            "/bogus\n/set\n",
        )
        .await;

        assert!(output.contains("! Unknown command '/bogus'. Type /help for a list."));
        assert!(output.contains("! Usage: /set <key> <value>"));
        assert!(session.transcript().is_empty());
    }
}
