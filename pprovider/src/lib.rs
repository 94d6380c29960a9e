//! Chat-completion request model, request builder, and transport layer.
//!
//! ```rust
//! use pconfig::Settings;
//! use pprovider::{ChatCompletion, build_request};
//! use serde_json::json;
//!
//! let request = build_request("hello", &Settings::default());
//! assert_eq!(request.model, "llama-3.1-sonar-small-128k-online");
//!
//! let completion = ChatCompletion::new(json!({
//!     "choices": [{ "message": { "role": "assistant", "content": "hi there" } }]
//! }));
//! assert_eq!(completion.content(), Some("hi there"));
//! ```

mod credentials;
mod error;
#[cfg(feature = "transport-http")]
mod http;
mod request;
mod transport;
mod types;

pub mod prelude {
    pub use crate::{
        ChatCompletion, ChatRequest, ChatTransport, NoopTransportHooks, ObservedTransport,
        ProviderError, ProviderErrorKind, Role, SecretString, TransportHooks, Turn,
        build_request,
    };

    #[cfg(feature = "transport-http")]
    pub use crate::{DEFAULT_BASE_URL, HttpTransport};
}

pub use credentials::SecretString;
pub use error::{ProviderError, ProviderErrorKind};
#[cfg(feature = "transport-http")]
pub use http::{DEFAULT_BASE_URL, HttpTransport};
pub use request::build_request;
pub use transport::{ChatTransport, NoopTransportHooks, ObservedTransport, TransportHooks};
pub use types::{ChatCompletion, ChatRequest, Role, Turn};
