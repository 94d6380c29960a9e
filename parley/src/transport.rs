//! Stable transport construction surface for facade consumers.

use std::sync::Arc;
use std::time::Duration;

use crate::{ChatTransport, ProviderError};

#[derive(Debug, Clone, Default)]
pub struct TransportBuildConfig {
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl TransportBuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Builds the HTTP transport. No timeout is applied unless one is configured.
#[cfg(feature = "transport-http")]
pub fn build_transport_with_config(
    config: TransportBuildConfig,
) -> Result<Arc<dyn ChatTransport>, ProviderError> {
    use pprovider::HttpTransport;

    let mut transport = match config.timeout {
        Some(timeout) => HttpTransport::with_timeout(timeout)?,
        None => HttpTransport::default(),
    };

    if let Some(base_url) = config.base_url {
        let base_url = base_url.trim().to_string();
        if base_url.is_empty() {
            return Err(ProviderError::invalid_request("base url must not be empty"));
        }
        transport = transport.with_base_url(base_url);
    }

    Ok(Arc::new(transport))
}

#[cfg(not(feature = "transport-http"))]
pub fn build_transport_with_config(
    _config: TransportBuildConfig,
) -> Result<Arc<dyn ChatTransport>, ProviderError> {
    Err(ProviderError::unavailable(
        "http transport is disabled; enable the `transport-http` feature",
    ))
}

pub fn build_default_transport() -> Result<Arc<dyn ChatTransport>, ProviderError> {
    build_transport_with_config(TransportBuildConfig::default())
}

#[cfg(all(test, feature = "transport-http"))]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn blank_base_url_is_rejected() {
        let error = match build_transport_with_config(TransportBuildConfig::new().with_base_url("  "))
        {
            Ok(_) => panic!("blank base url must fail"),
            Err(error) => error,
        };
        assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    }

    #[test]
    fn config_with_timeout_and_base_url_builds() {
        let config = TransportBuildConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(5));
        assert!(build_transport_with_config(config).is_ok());
        assert!(build_default_transport().is_ok());
    }
}
