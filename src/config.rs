use anyhow::{Context, Result};
use axum::http::HeaderValue;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

/// Config file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

pub const ENV_API_KEY: &str = "GROQ_API_KEY";
pub const ENV_DEFAULT_MODEL: &str = "DEFAULT_MODEL";
pub const ENV_ALLOWED_ORIGIN: &str = "ALLOWED_ORIGIN";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_request_body_limit")]
    pub request_body_limit_bytes: usize,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_graceful_shutdown_seconds")]
    pub graceful_shutdown_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Everything the relay handler needs per request. Resolved once at startup
/// and shared read-only between invocations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Upstream credential. Only ever taken from the environment.
    #[serde(skip)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_body_limit_bytes: default_request_body_limit(),
            request_timeout_ms: default_request_timeout(),
            graceful_shutdown_seconds: default_graceful_shutdown_seconds(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            json_logs: false,
        }
    }
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_request_body_limit() -> usize {
    262_144
}
fn default_request_timeout() -> u64 {
    60_000
}
fn default_graceful_shutdown_seconds() -> u64 {
    10
}
fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}
fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}
fn default_allowed_origin() -> String {
    "*".to_string()
}
fn default_tracing_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config file")
    }

    /// Apply `GROQ_API_KEY`, `DEFAULT_MODEL` and `ALLOWED_ORIGIN` on top of
    /// the file values. Empty or whitespace-only values count as unset.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(key) = read(ENV_API_KEY) {
            self.relay.api_key = Some(SecretString::new(key));
        }
        if let Some(model) = read(ENV_DEFAULT_MODEL) {
            self.relay.default_model = model;
        }
        if let Some(origin) = read(ENV_ALLOWED_ORIGIN) {
            self.relay.allowed_origin = origin;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.relay.default_model.trim().is_empty() {
            anyhow::bail!("relay.default_model must not be empty");
        }
        if self.upstream.base_url.trim().is_empty() {
            anyhow::bail!("upstream.base_url must not be empty");
        }
        self.relay.allowed_origin_header()?;
        Ok(())
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            Config::from_toml_str(&contents)?
        }
        None => match std::fs::read_to_string(DEFAULT_CONFIG_FILE) {
            Ok(contents) => Config::from_toml_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", DEFAULT_CONFIG_FILE))
            }
        },
    };

    config.apply_env_overrides(|name| std::env::var(name).ok());
    config.validate()?;

    Ok(config)
}

impl RelayConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn allowed_origin_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&self.allowed_origin).with_context(|| {
            format!(
                "relay.allowed_origin {:?} is not a valid header value",
                self.allowed_origin
            )
        })
    }
}

impl UpstreamConfig {
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn graceful_shutdown_duration(&self) -> Duration {
        Duration::from_secs(self.graceful_shutdown_seconds)
    }
}
