use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized `POST /v1/ask` payload.
///
/// Both fields arrive as loosely typed JSON and are coerced to strings:
/// `null`, `false` and `0` count as absent, numbers drop a zero fraction,
/// arrays join their elements with `,` and objects become their JSON text.
/// The results are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    /// Trimmed prompt. Empty when the field was absent or blank.
    pub text: String,
    /// Trimmed model override, `None` when absent or blank.
    pub model: Option<String>,
}

impl AskRequest {
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        Ok(Self::from_value(&value))
    }

    /// A body that is valid JSON but not an object has no fields at all.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .map(coerce_field)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let model = field("model");
        Self {
            text: field("text"),
            model: (!model.is_empty()).then_some(model),
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn resolve_model(&self, default_model: &str) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| default_model.to_string())
    }
}

fn coerce_field(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        other => stringify(other),
    }
}

/// Arrays join their elements with `,`; objects use their JSON text.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AskResponse {
    pub answer: String,
    pub model: String,
}

/// Error body. `error` is either a fixed message or an upstream payload
/// passed through untouched.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ErrorResponse {
    pub error: Value,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Value::String(message.into()),
        }
    }

    pub fn passthrough(payload: Value) -> Self {
        Self { error: payload }
    }
}
