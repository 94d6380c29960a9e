//! reqwest-based transport for OpenAI-compatible chat-completion endpoints.

use std::time::Duration;

use pcommon::BoxFuture;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;

use crate::credentials::SecretString;
use crate::error::ProviderError;
use crate::transport::ChatTransport;
use crate::types::{ChatCompletion, ChatRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Builds a transport whose client gives up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build().map_err(|error| {
            ProviderError::transport(format!("failed to build http client: {error}"))
        })?;
        Ok(Self::new(client))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = match extract_error_message(&body) {
            Some(detail) => format!("{status}: {detail}"),
            None => status.to_string(),
        };

        ProviderError::from_status(status.as_u16(), message)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl ChatTransport for HttpTransport {
    fn send<'a>(
        &'a self,
        request: ChatRequest,
        credentials: SecretString,
    ) -> BoxFuture<'a, Result<ChatCompletion, ProviderError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.endpoint())
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json")
                .bearer_auth(credentials.expose())
                .json(&request)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        ProviderError::timeout(err.to_string())
                    } else {
                        ProviderError::transport(err.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let bytes = response.bytes().await.map_err(|err| {
                if err.is_timeout() {
                    ProviderError::timeout(err.to_string())
                } else {
                    ProviderError::transport(err.to_string())
                }
            })?;
            let body = serde_json::from_slice::<Value>(&bytes).map_err(|err| {
                ProviderError::invalid_response(format!("response body is not json: {err}"))
            })?;

            Ok(ChatCompletion::new(body))
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_without_double_slash() {
        let transport = HttpTransport::default().with_base_url("http://localhost:8080/");
        assert_eq!(transport.endpoint(), "http://localhost:8080/chat/completions");

        let transport = HttpTransport::default();
        assert_eq!(transport.base_url(), DEFAULT_BASE_URL);
        assert_eq!(
            transport.endpoint(),
            "https://api.perplexity.ai/chat/completions"
        );
    }

    #[test]
    fn error_envelope_message_is_extracted() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"invalid model","type":"x"}}"#),
            Some("invalid model".to_string())
        );
        assert_eq!(extract_error_message("<html>bad gateway</html>"), None);
        assert_eq!(extract_error_message(""), None);
    }
}
