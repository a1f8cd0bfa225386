//! Flattening a conversation into a single CLI prompt.

use serde::{Deserialize, Serialize};

use super::content::{MessageContent, content_text};
use super::types::{ChatCompletionRequest, ChatMessage};

const MESSAGE_SEPARATOR: &str = "\n\n";

/// `"<ROLE>: <text>"` per message, joined by a blank line, trimmed.
#[must_use]
pub fn build_prompt(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.as_upper(), content_text(&m.content)))
        .collect::<Vec<_>>()
        .join(MESSAGE_SEPARATOR)
        .trim()
        .to_string()
}

/// Image URLs across all messages, in message order.
#[must_use]
pub fn extract_image_urls(messages: &[ChatMessage]) -> Vec<String> {
    messages
        .iter()
        .flat_map(|m| MessageContent::classify(&m.content).image_urls())
        .collect()
}

/// What the CLI invocation layer needs from a chat request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRequest {
    pub prompt: String,
    pub image_urls: Vec<String>,
}

impl NormalizedRequest {
    #[must_use]
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        let normalized = Self {
            prompt: build_prompt(messages),
            image_urls: extract_image_urls(messages),
        };
        tracing::debug!(
            messages = messages.len(),
            prompt_chars = normalized.prompt.chars().count(),
            images = normalized.image_urls.len(),
            "Normalized chat request"
        );
        normalized
    }

    #[must_use]
    pub fn from_request(request: &ChatCompletionRequest) -> Self {
        Self::from_messages(&request.messages)
    }

    #[must_use]
    pub fn has_images(&self) -> bool {
        !self.image_urls.is_empty()
    }
}
