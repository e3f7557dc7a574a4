//! HTTP relay that forwards a prompt to an OpenAI-compatible chat-completion
//! API and answers with a normalized `{answer, model}` body.

pub mod config;
pub mod relay;
pub mod routes;
pub mod types;

use crate::config::Config;
use crate::relay::{RelayHandler, UpstreamClient};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;

/// Build the fully layered router from a resolved configuration.
pub fn build_app(config: &Config) -> Result<Router> {
    let allowed_origin = config.relay.allowed_origin_header()?;
    let upstream =
        UpstreamClient::new(config.upstream.clone()).context("Failed to create upstream client")?;
    let handler = Arc::new(RelayHandler::new(config.relay.clone(), upstream));

    Ok(routes::create_router(
        handler,
        allowed_origin,
        config.server.request_body_limit_bytes,
        config.server.request_timeout(),
    ))
}
