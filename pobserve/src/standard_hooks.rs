//! Tracing and metrics hooks reported together.

use std::time::Duration;

use pchat::{ChatError, SessionHooks};
use pcommon::{Generation, SessionId};
use pprovider::{ProviderError, TransportHooks};

use crate::{MetricsObservabilityHooks, TracingObservabilityHooks};

/// Forwards every callback to [`TracingObservabilityHooks`] and then to
/// [`MetricsObservabilityHooks`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardObservabilityHooks {
    tracing: TracingObservabilityHooks,
    metrics: MetricsObservabilityHooks,
}

impl TransportHooks for StandardObservabilityHooks {
    fn on_request_start(&self, model: &str) {
        self.tracing.on_request_start(model);
        self.metrics.on_request_start(model);
    }

    fn on_request_success(&self, model: &str, elapsed: Duration) {
        self.tracing.on_request_success(model, elapsed);
        self.metrics.on_request_success(model, elapsed);
    }

    fn on_request_failure(&self, model: &str, elapsed: Duration, error: &ProviderError) {
        self.tracing.on_request_failure(model, elapsed, error);
        self.metrics.on_request_failure(model, elapsed, error);
    }
}

impl SessionHooks for StandardObservabilityHooks {
    fn on_exchange_start(&self, session_id: &SessionId, generation: Generation, model: &str) {
        self.tracing.on_exchange_start(session_id, generation, model);
        self.metrics.on_exchange_start(session_id, generation, model);
    }

    fn on_exchange_delivered(
        &self,
        session_id: &SessionId,
        generation: Generation,
        elapsed: Duration,
    ) {
        self.tracing
            .on_exchange_delivered(session_id, generation, elapsed);
        self.metrics
            .on_exchange_delivered(session_id, generation, elapsed);
    }

    fn on_exchange_failed(
        &self,
        session_id: &SessionId,
        generation: Generation,
        error: &ChatError,
        elapsed: Duration,
    ) {
        self.tracing
            .on_exchange_failed(session_id, generation, error, elapsed);
        self.metrics
            .on_exchange_failed(session_id, generation, error, elapsed);
    }

    fn on_stale_response(&self, session_id: &SessionId, issued: Generation, current: Generation) {
        self.tracing.on_stale_response(session_id, issued, current);
        self.metrics.on_stale_response(session_id, issued, current);
    }

    fn on_reset(&self, session_id: &SessionId, generation: Generation) {
        self.tracing.on_reset(session_id, generation);
        self.metrics.on_reset(session_id, generation);
    }
}
