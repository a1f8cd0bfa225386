//! OpenAI-compatible chat request handling.
//!
//! Turns a chat payload into the flattened prompt and image list that the
//! agent CLIs accept. Everything here is pure and synchronous.

pub mod content;
pub mod normalize;
pub mod types;

pub use content::{MessageContent, content_text, image_urls};
pub use normalize::{NormalizedRequest, build_prompt, extract_image_urls};
pub use types::{ChatCompletionRequest, ChatMessage, ErrorResponse, Role};
