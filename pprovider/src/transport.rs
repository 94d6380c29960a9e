//! Transport contract, operation hooks, and the observing decorator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pcommon::BoxFuture;

use crate::credentials::SecretString;
use crate::error::ProviderError;
use crate::types::{ChatCompletion, ChatRequest};

/// Performs one request/response exchange with a chat-completion endpoint.
///
/// Implementations do not retry.
pub trait ChatTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: ChatRequest,
        credentials: SecretString,
    ) -> BoxFuture<'a, Result<ChatCompletion, ProviderError>>;
}

impl<T> ChatTransport for Arc<T>
where
    T: ChatTransport + ?Sized,
{
    fn send<'a>(
        &'a self,
        request: ChatRequest,
        credentials: SecretString,
    ) -> BoxFuture<'a, Result<ChatCompletion, ProviderError>> {
        self.as_ref().send(request, credentials)
    }
}

pub trait TransportHooks: Send + Sync {
    fn on_request_start(&self, _model: &str) {}

    fn on_request_success(&self, _model: &str, _elapsed: Duration) {}

    fn on_request_failure(&self, _model: &str, _elapsed: Duration, _error: &ProviderError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTransportHooks;

impl TransportHooks for NoopTransportHooks {}

/// Wraps a transport and reports every call to [`TransportHooks`].
pub struct ObservedTransport<T> {
    inner: T,
    hooks: Arc<dyn TransportHooks>,
}

impl<T> ObservedTransport<T>
where
    T: ChatTransport,
{
    pub fn new(inner: T, hooks: Arc<dyn TransportHooks>) -> Self {
        Self { inner, hooks }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T> ChatTransport for ObservedTransport<T>
where
    T: ChatTransport,
{
    fn send<'a>(
        &'a self,
        request: ChatRequest,
        credentials: SecretString,
    ) -> BoxFuture<'a, Result<ChatCompletion, ProviderError>> {
        Box::pin(async move {
            let model = request.model.clone();
            self.hooks.on_request_start(&model);
            let started = Instant::now();

            match self.inner.send(request, credentials).await {
                Ok(completion) => {
                    self.hooks.on_request_success(&model, started.elapsed());
                    Ok(completion)
                }
                Err(error) => {
                    self.hooks
                        .on_request_failure(&model, started.elapsed(), &error);
                    Err(error)
                }
            }
        })
    }
}
