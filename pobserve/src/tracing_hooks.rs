//! Tracing-based observability hooks for session lifecycle and transport calls.
//!
//! ```rust
//! use pchat::SessionHooks;
//! use pobserve::TracingObservabilityHooks;
//!
//! fn accepts_session_hooks(_hooks: &dyn SessionHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_session_hooks(&hooks);
//! ```

use std::time::Duration;

use pchat::{ChatError, SessionHooks};
use pcommon::{Generation, SessionId};
use pprovider::{ProviderError, TransportHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl TransportHooks for TracingObservabilityHooks {
    fn on_request_start(&self, model: &str) {
        tracing::info!(phase = "transport", event = "request_start", model);
    }

    fn on_request_success(&self, model: &str, elapsed: Duration) {
        tracing::info!(
            phase = "transport",
            event = "request_success",
            model,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_request_failure(&self, model: &str, elapsed: Duration, error: &ProviderError) {
        tracing::error!(
            phase = "transport",
            event = "request_failure",
            model,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            status = error.status,
            error = %error
        );
    }
}

impl SessionHooks for TracingObservabilityHooks {
    fn on_exchange_start(&self, session_id: &SessionId, generation: Generation, model: &str) {
        tracing::info!(
            phase = "session",
            event = "exchange_start",
            session_id = %session_id,
            generation = generation.get(),
            model
        );
    }

    fn on_exchange_delivered(
        &self,
        session_id: &SessionId,
        generation: Generation,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "session",
            event = "exchange_delivered",
            session_id = %session_id,
            generation = generation.get(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_exchange_failed(
        &self,
        session_id: &SessionId,
        generation: Generation,
        error: &ChatError,
        elapsed: Duration,
    ) {
        tracing::warn!(
            phase = "session",
            event = "exchange_failed",
            session_id = %session_id,
            generation = generation.get(),
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_stale_response(&self, session_id: &SessionId, issued: Generation, current: Generation) {
        tracing::warn!(
            phase = "session",
            event = "stale_response",
            session_id = %session_id,
            issued_generation = issued.get(),
            current_generation = current.get()
        );
    }

    fn on_reset(&self, session_id: &SessionId, generation: Generation) {
        tracing::info!(
            phase = "session",
            event = "reset",
            session_id = %session_id,
            generation = generation.get()
        );
    }
}
