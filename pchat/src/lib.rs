//! Chat session core: transcript log, exchange state machine, and lifecycle hooks.
//!
//! ```rust
//! use pchat::{ChatErrorKind, SessionPhase};
//!
//! assert!(SessionPhase::Delivered.is_ready());
//! assert!(!SessionPhase::Sending.is_ready());
//! assert_ne!(ChatErrorKind::NoContent, ChatErrorKind::Transport);
//! ```

mod error;
mod hooks;
mod session;
mod transcript;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatSession, NoopSessionHooks, PendingExchange, SessionHooks,
        SessionPhase, TranscriptLog,
    };
}

pub use error::{ChatError, ChatErrorKind};
pub use hooks::{NoopSessionHooks, SessionHooks};
pub use session::{ChatSession, PendingExchange, SessionPhase};
pub use transcript::TranscriptLog;
