use crate::config::RelayConfig;
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::upstream::UpstreamClient;
use crate::types::{first_choice_content, AskRequest, AskResponse, ChatCompletionRequest};
use axum::{extract::State, Json};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stateless relay: parse, validate, one upstream call, reshape.
#[derive(Debug, Clone)]
pub struct RelayHandler {
    config: Arc<RelayConfig>,
    upstream: UpstreamClient,
}

impl RelayHandler {
    pub fn new(config: RelayConfig, upstream: UpstreamClient) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
        }
    }

    /// Run one relay over a raw request body.
    ///
    /// The credential is checked only after the input is valid, so a blank
    /// prompt is always a 400 even on an unconfigured server.
    pub async fn ask(&self, body: &[u8]) -> RelayResult<AskResponse> {
        let request = AskRequest::from_json(body)?;
        if !request.has_text() {
            return Err(RelayError::MissingText);
        }

        let api_key = self.config.api_key.as_ref().ok_or(RelayError::NotConfigured)?;

        let model = request.resolve_model(&self.config.default_model);
        info!(
            "Relaying prompt ({} chars) to model {}",
            request.text.chars().count(),
            model
        );

        let payload = ChatCompletionRequest::for_prompt(model.clone(), request.text);
        let reply = self.upstream.chat_completion(api_key, &payload).await?;

        if !reply.is_success() {
            return Err(RelayError::Upstream {
                status: reply.status,
                payload: reply.body,
            });
        }

        let answer = first_choice_content(&reply.body);
        if answer.is_empty() {
            warn!("Upstream response for model {} had no answer content", model);
        } else {
            debug!("Upstream answered with {} chars", answer.chars().count());
        }

        Ok(AskResponse { answer, model })
    }

    /// `POST /v1/ask`
    pub async fn handle_ask(
        State(handler): State<Arc<RelayHandler>>,
        body: Bytes,
    ) -> RelayResult<Json<AskResponse>> {
        handler.ask(&body).await.map(Json)
    }
}
