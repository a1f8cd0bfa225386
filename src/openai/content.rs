//! Message content shapes and the two extractions run over them.
//!
//! Content is classified once into [`MessageContent`]; text and image
//! extraction then match on the variant. Both extractions are total: parts
//! with an unexpected shape are skipped, never rejected.

use serde_json::{Map, Value};

const TEXT_PART: &str = "text";
const IMAGE_PART_TYPES: [&str; 2] = ["image_url", "input_image"];

/// Borrowed view of a message's `content` field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageContent<'a> {
    /// `null` or absent.
    Empty,
    /// Plain string.
    Text(&'a str),
    /// A single typed part given without the surrounding list.
    Part(&'a Map<String, Value>),
    /// The standard list-of-parts form.
    Parts(&'a [Value]),
    /// Numbers, booleans and anything else.
    Other(&'a Value),
}

impl<'a> MessageContent<'a> {
    #[must_use]
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(s) => Self::Text(s),
            Value::Object(map) => Self::Part(map),
            Value::Array(items) => Self::Parts(items),
            other => Self::Other(other),
        }
    }

    /// Prompt text for this content.
    ///
    /// Lists concatenate their text parts with no separator. A single part
    /// that is not text, like any other unrecognized value, falls back to its
    /// compact JSON rendering.
    #[must_use]
    pub fn text(&self) -> String {
        match *self {
            Self::Empty => String::new(),
            Self::Text(s) => s.to_string(),
            Self::Parts(items) => items
                .iter()
                .filter_map(Value::as_object)
                .filter_map(part_text)
                .collect(),
            Self::Part(map) => part_text(map)
                .map_or_else(|| Value::Object(map.clone()).to_string(), str::to_string),
            Self::Other(value) => value.to_string(),
        }
    }

    /// Image URLs referenced by this content, in order. Never contains empty strings.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        match *self {
            Self::Part(map) => part_image_url(map).map(str::to_string).into_iter().collect(),
            Self::Parts(items) => items
                .iter()
                .filter_map(Value::as_object)
                .filter_map(part_image_url)
                .map(str::to_string)
                .collect(),
            Self::Empty | Self::Text(_) | Self::Other(_) => Vec::new(),
        }
    }
}

fn part_type(part: &Map<String, Value>) -> Option<&str> {
    part.get("type").and_then(Value::as_str)
}

fn part_text(part: &Map<String, Value>) -> Option<&str> {
    if part_type(part) != Some(TEXT_PART) {
        return None;
    }
    part.get("text").and_then(Value::as_str)
}

fn part_image_url(part: &Map<String, Value>) -> Option<&str> {
    if !part_type(part).is_some_and(|t| IMAGE_PART_TYPES.contains(&t)) {
        return None;
    }
    let url = match part.get("image_url")? {
        Value::Object(image) => image.get("url").and_then(Value::as_str)?,
        Value::String(url) => url.as_str(),
        _ => return None,
    };
    (!url.is_empty()).then_some(url)
}

/// Text of a raw content value.
#[must_use]
pub fn content_text(content: &Value) -> String {
    MessageContent::classify(content).text()
}

/// Image URLs of a raw content value.
#[must_use]
pub fn image_urls(content: &Value) -> Vec<String> {
    MessageContent::classify(content).image_urls()
}
