#![allow(dead_code)]

use ask_relay::{build_app, config::Config};
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_KEY: &str = "gsk-test-key";

/// Config pointing at a mock upstream, with the credential set.
pub fn test_config(mock_server: &MockServer) -> Config {
    let mut config = Config::default();
    config.upstream.base_url = format!("{}/openai/v1", mock_server.uri());
    config.relay.api_key = Some(SecretString::new(TEST_KEY.to_string()));
    config
}

pub fn create_test_app(config: &Config) -> Router {
    build_app(config).unwrap()
}

pub fn ask_request(body: Value) -> Request<Body> {
    raw_ask_request(body.to_string())
}

pub fn raw_ask_request(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/ask")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test123",
        "object": "chat.completion",
        "created": 1234567890,
        "model": "llama-3.1-8b-instant",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 31,
            "completion_tokens": 9,
            "total_tokens": 40
        }
    })
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn assert_cors_headers(response: &Response<Body>, origin: &str) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], origin);
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}
