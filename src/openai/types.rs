//! Wire types for OpenAI-compatible chat completion requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GatewayError, Result};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    Developer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Developer => "developer",
        }
    }

    /// Prefix used when flattening a conversation into a prompt.
    #[must_use]
    pub const fn as_upper(self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::User => "USER",
            Self::Assistant => "ASSISTANT",
            Self::Tool => "TOOL",
            Self::Developer => "DEVELOPER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message. `content` is kept as raw JSON; clients send strings, part
/// lists, single parts and occasionally other shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Value,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: Role, content: impl Into<Value>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// `POST /v1/chat/completions` body. Unknown fields (temperature, tools, ...)
/// are retained in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatCompletionRequest {
    /// Parse a request body.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] when the body is not valid JSON
    /// or does not match the request shape.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| GatewayError::InvalidRequest(e.to_string()))
    }
}

/// OpenAI-style error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Map<String, Value>,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(message: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut error = Map::new();
        error.insert("message".to_string(), Value::String(message.into()));
        error.insert("type".to_string(), Value::String(kind.into()));
        Self { error }
    }

    /// Attach a machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error
            .insert("code".to_string(), Value::String(code.into()));
        self
    }
}

impl From<&GatewayError> for ErrorResponse {
    fn from(err: &GatewayError) -> Self {
        let kind = match err {
            GatewayError::InvalidRequest(_) => "invalid_request_error".to_string(),
            other => other.category().to_string().to_lowercase().replace(' ', "_"),
        };
        Self::new(err.to_string(), kind).with_code(err.error_code())
    }
}
