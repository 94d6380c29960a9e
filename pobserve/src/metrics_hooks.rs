//! Metrics-based observability hooks for session lifecycle and transport calls.
//!
//! ```rust
//! use pobserve::MetricsObservabilityHooks;
//! use pprovider::TransportHooks;
//!
//! fn accepts_transport_hooks(_hooks: &dyn TransportHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_transport_hooks(&hooks);
//! ```

use std::time::Duration;

use pchat::{ChatError, SessionHooks};
use pcommon::{Generation, SessionId};
use pprovider::{ProviderError, TransportHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl TransportHooks for MetricsObservabilityHooks {
    fn on_request_start(&self, model: &str) {
        metrics::counter!(
            "parley_transport_request_start_total",
            "model" => model.to_string()
        )
        .increment(1);
    }

    fn on_request_success(&self, model: &str, elapsed: Duration) {
        metrics::counter!(
            "parley_transport_request_success_total",
            "model" => model.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "parley_transport_request_duration_seconds",
            "model" => model.to_string(),
            "outcome" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_request_failure(&self, model: &str, elapsed: Duration, error: &ProviderError) {
        metrics::counter!(
            "parley_transport_request_failure_total",
            "model" => model.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "parley_transport_request_duration_seconds",
            "model" => model.to_string(),
            "outcome" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl SessionHooks for MetricsObservabilityHooks {
    fn on_exchange_start(&self, _session_id: &SessionId, _generation: Generation, model: &str) {
        metrics::counter!(
            "parley_session_exchange_start_total",
            "model" => model.to_string()
        )
        .increment(1);
    }

    fn on_exchange_delivered(
        &self,
        _session_id: &SessionId,
        _generation: Generation,
        elapsed: Duration,
    ) {
        metrics::counter!("parley_session_exchange_delivered_total").increment(1);
        metrics::histogram!("parley_session_exchange_duration_seconds", "outcome" => "delivered")
            .record(elapsed.as_secs_f64());
    }

    fn on_exchange_failed(
        &self,
        _session_id: &SessionId,
        _generation: Generation,
        error: &ChatError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "parley_session_exchange_failed_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!("parley_session_exchange_duration_seconds", "outcome" => "failed")
            .record(elapsed.as_secs_f64());
    }

    fn on_stale_response(
        &self,
        _session_id: &SessionId,
        _issued: Generation,
        _current: Generation,
    ) {
        metrics::counter!("parley_session_stale_response_total").increment(1);
    }

    fn on_reset(&self, _session_id: &SessionId, _generation: Generation) {
        metrics::counter!("parley_session_reset_total").increment(1);
    }
}
