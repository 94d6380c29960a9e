use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use pchat::{ChatError, SessionHooks};
use pcommon::{Generation, SessionId};
use pprovider::{ProviderError, TransportHooks};

pub struct SafeTransportHooks<H> {
    inner: H,
}

impl<H> SafeTransportHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> TransportHooks for SafeTransportHooks<H>
where
    H: TransportHooks,
{
    fn on_request_start(&self, model: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_request_start(model)));
    }

    fn on_request_success(&self, model: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_request_success(model, elapsed)
        }));
    }

    fn on_request_failure(&self, model: &str, elapsed: Duration, error: &ProviderError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_request_failure(model, elapsed, error)
        }));
    }
}

pub struct SafeSessionHooks<H> {
    inner: H,
}

impl<H> SafeSessionHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> SessionHooks for SafeSessionHooks<H>
where
    H: SessionHooks,
{
    fn on_exchange_start(&self, session_id: &SessionId, generation: Generation, model: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_exchange_start(session_id, generation, model)
        }));
    }

    fn on_exchange_delivered(
        &self,
        session_id: &SessionId,
        generation: Generation,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_exchange_delivered(session_id, generation, elapsed)
        }));
    }

    fn on_exchange_failed(
        &self,
        session_id: &SessionId,
        generation: Generation,
        error: &ChatError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_exchange_failed(session_id, generation, error, elapsed)
        }));
    }

    fn on_stale_response(&self, session_id: &SessionId, issued: Generation, current: Generation) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_stale_response(session_id, issued, current)
        }));
    }

    fn on_reset(&self, session_id: &SessionId, generation: Generation) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_reset(session_id, generation)
        }));
    }
}
