use serde::{Deserialize, Serialize};
use serde_json::Value;

/// System instruction sent ahead of every user prompt.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful automotive software and safety assistant. Answer succinctly.";

/// Low sampling temperature, favoring repeatable answers.
pub const TEMPERATURE: f64 = 0.2;

pub const MAX_TOKENS: u32 = 512;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// OpenAI-compatible chat-completion payload sent upstream.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    pub fn for_prompt(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(text)],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Content of `choices[0].message.content`, or `""` when the upstream body
/// does not have that shape.
pub fn first_choice_content(body: &Value) -> String {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let payload = serde_json::to_value(ChatCompletionRequest::for_prompt(
            "llama-3.1-8b-instant",
            "Explain ISO 26262 in one line",
        ))
        .unwrap();

        assert_eq!(
            payload,
            json!({
                "model": "llama-3.1-8b-instant",
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": "Explain ISO 26262 in one line"}
                ],
                "temperature": 0.2,
                "max_tokens": 512
            })
        );
    }

    #[test]
    fn test_first_choice_content() {
        let body = json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Functional safety."}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        });
        assert_eq!(first_choice_content(&body), "Functional safety.");
    }

    #[test]
    fn test_first_choice_content_defaults_to_empty() {
        for body in [
            json!({}),
            json!({"choices": []}),
            json!({"choices": [{}]}),
            json!({"choices": [{"message": {}}]}),
            json!({"choices": [{"message": {"content": null}}]}),
            json!({"choices": [{"message": {"content": 7}}]}),
            json!({"choices": "nope"}),
            json!([1, 2, 3]),
        ] {
            assert_eq!(first_choice_content(&body), "", "body: {}", body);
        }
    }
}
