//! Production-friendly observability hooks for chat sessions and transport calls.
//!
//! ```rust
//! use pobserve::{
//!     MetricsObservabilityHooks, SafeSessionHooks, SafeTransportHooks,
//!     StandardObservabilityHooks, TracingObservabilityHooks,
//! };
//!
//! let _session_hooks = SafeSessionHooks::new(TracingObservabilityHooks);
//! let _transport_hooks = SafeTransportHooks::new(StandardObservabilityHooks::default());
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod standard_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeSessionHooks, SafeTransportHooks};
pub use standard_hooks::StandardObservabilityHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeSessionHooks, SafeTransportHooks,
        StandardObservabilityHooks, TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
