//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use pcommon::{Generation, SessionId};
//!
//! let session = SessionId::from("session-1");
//! let generation = Generation::initial().next();
//!
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(generation.get(), 1);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use pcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Session identifiers shared by the chat core and the observability hooks.
    //!
    //! ```rust
    //! use pcommon::{Generation, SessionId};
    //!
    //! let session = SessionId::new("session-42");
    //! assert_eq!(session.to_string(), "session-42");
    //!
    //! let first = Generation::initial();
    //! assert!(first.next() > first);
    //! ```

    use std::fmt::{Display, Formatter};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        /// Builds an id of the form `<prefix>-<unix millis>`.
        pub fn generate(prefix: &str) -> Self {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_millis())
                .unwrap_or_default();
            Self(format!("{prefix}-{millis}"))
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }

    /// Monotonic counter of transcript lifetimes within one session.
    ///
    /// Every "new chat" moves the session to the next generation; work started under an
    /// older generation is stale.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct Generation(u64);

    impl Generation {
        pub fn initial() -> Self {
            Self(0)
        }

        pub fn next(self) -> Self {
            Self(self.0.wrapping_add(1))
        }

        pub fn get(self) -> u64 {
            self.0
        }
    }

    impl Display for Generation {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }
}

pub use context::{Generation, SessionId};
pub use future::BoxFuture;
