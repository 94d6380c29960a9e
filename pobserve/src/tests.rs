use std::sync::{Arc, Mutex};
use std::time::Duration;

use pchat::{ChatError, SessionHooks};
use pcommon::{Generation, SessionId};
use pprovider::{ProviderError, TransportHooks};

use crate::{
    MetricsObservabilityHooks, SafeSessionHooks, SafeTransportHooks, StandardObservabilityHooks,
    TracingObservabilityHooks,
};

fn session() -> SessionId {
    SessionId::from("session-1")
}

fn exercise_session_hooks(hooks: &dyn SessionHooks) {
    let generation = Generation::initial();
    hooks.on_exchange_start(&session(), generation, "llama-3.1-8b-instruct");
    hooks.on_exchange_delivered(&session(), generation, Duration::from_millis(12));
    hooks.on_exchange_failed(
        &session(),
        generation,
        &ChatError::no_content(),
        Duration::from_millis(30),
    );
    hooks.on_stale_response(&session(), generation, generation.next());
    hooks.on_reset(&session(), generation.next());
}

fn exercise_transport_hooks(hooks: &dyn TransportHooks) {
    hooks.on_request_start("llama-3.1-8b-instruct");
    hooks.on_request_success("llama-3.1-8b-instruct", Duration::from_millis(40));
    hooks.on_request_failure(
        "llama-3.1-8b-instruct",
        Duration::from_millis(40),
        &ProviderError::from_status(500, "500 Internal Server Error"),
    );
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise_session_hooks(&TracingObservabilityHooks);
    exercise_transport_hooks(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise_session_hooks(&MetricsObservabilityHooks);
    exercise_transport_hooks(&MetricsObservabilityHooks);
}

#[test]
fn standard_hooks_smoke_test_all_callbacks() {
    let hooks = StandardObservabilityHooks::default();
    exercise_session_hooks(&hooks);
    exercise_transport_hooks(&hooks);
}

#[derive(Clone, Default)]
struct RecordingSessionHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl SessionHooks for RecordingSessionHooks {
    fn on_exchange_start(&self, _session_id: &SessionId, _generation: Generation, _model: &str) {
        self.events.lock().expect("events lock").push("start");
    }

    fn on_stale_response(
        &self,
        _session_id: &SessionId,
        _issued: Generation,
        _current: Generation,
    ) {
        self.events.lock().expect("events lock").push("stale");
    }

    fn on_reset(&self, _session_id: &SessionId, _generation: Generation) {
        self.events.lock().expect("events lock").push("reset");
    }
}

#[test]
fn safe_session_hooks_forward_to_inner_hooks() {
    let recorder = RecordingSessionHooks::default();
    let hooks = SafeSessionHooks::new(recorder.clone());

    exercise_session_hooks(&hooks);

    assert_eq!(
        recorder.events.lock().expect("events lock").clone(),
        vec!["start", "stale", "reset"]
    );
}

struct PanicSessionHooks;

impl SessionHooks for PanicSessionHooks {
    fn on_exchange_start(&self, _session_id: &SessionId, _generation: Generation, _model: &str) {
        panic!("start panic");
    }

    fn on_exchange_delivered(
        &self,
        _session_id: &SessionId,
        _generation: Generation,
        _elapsed: Duration,
    ) {
        panic!("delivered panic");
    }

    fn on_exchange_failed(
        &self,
        _session_id: &SessionId,
        _generation: Generation,
        _error: &ChatError,
        _elapsed: Duration,
    ) {
        panic!("failed panic");
    }

    fn on_stale_response(
        &self,
        _session_id: &SessionId,
        _issued: Generation,
        _current: Generation,
    ) {
        panic!("stale panic");
    }

    fn on_reset(&self, _session_id: &SessionId, _generation: Generation) {
        panic!("reset panic");
    }
}

struct PanicTransportHooks;

impl TransportHooks for PanicTransportHooks {
    fn on_request_start(&self, _model: &str) {
        panic!("start panic");
    }

    fn on_request_success(&self, _model: &str, _elapsed: Duration) {
        panic!("success panic");
    }

    fn on_request_failure(&self, _model: &str, _elapsed: Duration, _error: &ProviderError) {
        panic!("failure panic");
    }
}

#[test]
fn safe_hooks_swallow_panics() {
    exercise_session_hooks(&SafeSessionHooks::new(PanicSessionHooks));
    exercise_transport_hooks(&SafeTransportHooks::new(PanicTransportHooks));
}
