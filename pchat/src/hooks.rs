//! Session lifecycle hook contract.

use std::time::Duration;

use pcommon::{Generation, SessionId};

use crate::ChatError;

pub trait SessionHooks: Send + Sync {
    fn on_exchange_start(&self, _session_id: &SessionId, _generation: Generation, _model: &str) {}

    fn on_exchange_delivered(
        &self,
        _session_id: &SessionId,
        _generation: Generation,
        _elapsed: Duration,
    ) {
    }

    fn on_exchange_failed(
        &self,
        _session_id: &SessionId,
        _generation: Generation,
        _error: &ChatError,
        _elapsed: Duration,
    ) {
    }

    /// A response arrived for a conversation that has since been reset and was discarded.
    fn on_stale_response(
        &self,
        _session_id: &SessionId,
        _issued: Generation,
        _current: Generation,
    ) {
    }

    fn on_reset(&self, _session_id: &SessionId, _generation: Generation) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionHooks;

impl SessionHooks for NoopSessionHooks {}
