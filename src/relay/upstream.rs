use crate::config::UpstreamConfig;
use crate::relay::error::{RelayError, RelayResult};
use crate::types::ChatCompletionRequest;
use axum::http::StatusCode;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;

/// Client for the upstream chat-completion API.
///
/// Every call is a single attempt. The underlying `reqwest::Client` keeps
/// its own connection pool and its default timeouts; the server-level
/// request timeout is what bounds a slow upstream.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamConfig,
}

/// Status and parsed JSON body of an upstream response, whatever the status.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| RelayError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn chat_completions_url(&self) -> String {
        self.config.chat_completions_url()
    }

    /// POST one chat-completion request and parse the body as JSON.
    ///
    /// Transport failures and non-JSON bodies are errors; a non-2xx status
    /// with a JSON body is a normal [`UpstreamReply`].
    pub async fn chat_completion(
        &self,
        api_key: &SecretString,
        payload: &ChatCompletionRequest,
    ) -> RelayResult<UpstreamReply> {
        let url = self.chat_completions_url();
        debug!(
            "Sending chat completion for model {} to {} with API key (redacted)",
            payload.model, url
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(payload)
            .send()
            .await?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| RelayError::internal(format!("Invalid status code: {}", e)))?;
        debug!("Received response from upstream. Status: {}", status);

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        Ok(UpstreamReply { status, body })
    }
}
