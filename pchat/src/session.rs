//! Conversation session: input validation, one exchange in flight, transcript upkeep.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use pcommon::{Generation, SessionId};
use pconfig::ConfigStore;
use pprovider::{ChatRequest, ChatTransport, SecretString, Turn, build_request};

use crate::hooks::{NoopSessionHooks, SessionHooks};
use crate::transcript::TranscriptLog;
use crate::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Sending,
    Delivered,
    Failed,
}

impl SessionPhase {
    /// Whether a new message may be submitted.
    pub fn is_ready(self) -> bool {
        !matches!(self, Self::Sending)
    }
}

/// An accepted exchange whose request has not been sent yet.
///
/// Produced by [`ChatSession::begin`] and consumed by [`ChatSession::complete`]. A pending
/// exchange that is dropped without completing keeps the session in
/// [`SessionPhase::Sending`] until [`ChatSession::reset`].
#[must_use = "a pending exchange holds the session in Sending until completed"]
pub struct PendingExchange {
    generation: Generation,
    request: ChatRequest,
    credentials: SecretString,
    started: Instant,
}

impl PendingExchange {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

impl std::fmt::Debug for PendingExchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingExchange")
            .field("generation", &self.generation)
            .field("request", &self.request)
            .field("credentials", &self.credentials)
            .finish()
    }
}

#[derive(Debug)]
struct SessionState {
    transcript: TranscriptLog,
    phase: SessionPhase,
    generation: Generation,
}

/// One conversation against a chat-completion endpoint.
///
/// Each exchange sends the system prompt and the latest user message only; earlier turns
/// are kept for display and never replayed.
///
/// ```rust
/// use std::sync::Arc;
///
/// use pchat::{ChatSession, SessionPhase};
/// use pcommon::BoxFuture;
/// use pconfig::ConfigStore;
/// use pprovider::{ChatCompletion, ChatRequest, ChatTransport, ProviderError, SecretString};
/// use serde_json::json;
///
/// struct Echo;
///
/// impl ChatTransport for Echo {
///     fn send<'a>(
///         &'a self,
///         request: ChatRequest,
///         _credentials: SecretString,
///     ) -> BoxFuture<'a, Result<ChatCompletion, ProviderError>> {
///         Box::pin(async move {
///             let text = request.user_message().map(|turn| turn.content().to_string());
///             Ok(ChatCompletion::new(json!({
///                 "choices": [{ "message": { "content": text } }]
///             })))
///         })
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let session = ChatSession::new(Arc::new(ConfigStore::in_memory()), Arc::new(Echo));
/// let reply = session.submit("ping").await.expect("echo should answer");
///
/// assert_eq!(reply.content(), "ping");
/// assert_eq!(session.phase(), SessionPhase::Delivered);
/// assert_eq!(session.transcript().len(), 2);
/// # }
/// ```
pub struct ChatSession {
    id: SessionId,
    config: Arc<ConfigStore>,
    transport: Arc<dyn ChatTransport>,
    hooks: Arc<dyn SessionHooks>,
    state: Mutex<SessionState>,
}

impl ChatSession {
    pub fn new(config: Arc<ConfigStore>, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            id: SessionId::generate("chat"),
            config,
            transport,
            hooks: Arc::new(NoopSessionHooks),
            state: Mutex::new(SessionState {
                transcript: TranscriptLog::new(),
                phase: SessionPhase::Idle,
                generation: Generation::initial(),
            }),
        }
    }

    pub fn with_id(mut self, id: impl Into<SessionId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.state().phase
    }

    pub fn generation(&self) -> Generation {
        self.state().generation
    }

    /// Copy of the turns recorded since the last reset, oldest first.
    pub fn transcript(&self) -> Vec<Turn> {
        self.state().transcript.all().to_vec()
    }

    /// Accepts `text` for sending.
    ///
    /// Records the trimmed user turn, builds the request from the current settings and moves
    /// to [`SessionPhase::Sending`]. Blank input and a second submit while sending are
    /// rejected without touching the transcript.
    pub fn begin(&self, text: &str) -> Result<PendingExchange, ChatError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(ChatError::invalid_input());
        }

        let settings = self.config.snapshot()?;
        let request = build_request(message, &settings);

        let generation = {
            let mut state = self.state();
            if state.phase == SessionPhase::Sending {
                return Err(ChatError::busy());
            }

            state.transcript.append(Turn::user(message));
            state.phase = SessionPhase::Sending;
            state.generation
        };

        self.hooks
            .on_exchange_start(&self.id, generation, &request.model);

        Ok(PendingExchange {
            generation,
            request,
            credentials: SecretString::new(settings.api_key),
            started: Instant::now(),
        })
    }

    /// Sends a pending exchange and records the outcome.
    ///
    /// A reply is appended as an assistant turn. A missing reply or a transport failure
    /// leaves the transcript as it was and moves to [`SessionPhase::Failed`]. A reply for a
    /// generation that has since been reset is discarded without touching state.
    pub async fn complete(&self, pending: PendingExchange) -> Result<Turn, ChatError> {
        let PendingExchange {
            generation,
            request,
            credentials,
            started,
        } = pending;

        let outcome = self.transport.send(request, credentials).await;

        let result = {
            let mut state = self.state();
            if state.generation != generation {
                let current = state.generation;
                drop(state);
                self.hooks.on_stale_response(&self.id, generation, current);
                return Err(ChatError::stale(generation, current));
            }

            match outcome {
                Ok(completion) => match completion.content() {
                    Some(content) => {
                        let turn = Turn::assistant(content);
                        state.transcript.append(turn.clone());
                        state.phase = SessionPhase::Delivered;
                        Ok(turn)
                    }
                    None => {
                        state.phase = SessionPhase::Failed;
                        Err(ChatError::no_content())
                    }
                },
                Err(error) => {
                    state.phase = SessionPhase::Failed;
                    Err(ChatError::from(error))
                }
            }
        };

        match &result {
            Ok(_) => self
                .hooks
                .on_exchange_delivered(&self.id, generation, started.elapsed()),
            Err(error) => {
                self.hooks
                    .on_exchange_failed(&self.id, generation, error, started.elapsed())
            }
        }

        result
    }

    pub async fn submit(&self, text: &str) -> Result<Turn, ChatError> {
        let pending = self.begin(text)?;
        self.complete(pending).await
    }

    /// Like [`ChatSession::submit`], but clears `input` as soon as the text is accepted.
    ///
    /// Rejected input is left in the buffer.
    pub async fn submit_input(&self, input: &mut String) -> Result<Turn, ChatError> {
        let pending = self.begin(input)?;
        input.clear();
        self.complete(pending).await
    }

    /// Starts a new conversation.
    ///
    /// Clears the transcript, advances the generation, returns to [`SessionPhase::Idle`] and
    /// reloads settings. The transcript is cleared even if the reload fails.
    pub async fn reset(&self) -> Result<(), ChatError> {
        let generation = {
            let mut state = self.state();
            state.transcript.reset();
            state.generation = state.generation.next();
            state.phase = SessionPhase::Idle;
            state.generation
        };

        self.hooks.on_reset(&self.id, generation);
        self.config.load().await?;
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("state", &self.state.lock().ok())
            .finish_non_exhaustive()
    }
}
