//! Rendering for the `prompt` command.

use std::fmt::Write as _;

use super::paint;
use crate::error::Result;
use crate::openai::NormalizedRequest;

/// Prompt text, then one `image: <url>` line per image after a blank line.
#[must_use]
pub fn render_human(normalized: &NormalizedRequest, no_color: bool) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", normalized.prompt);
    if normalized.has_images() {
        output.push('\n');
        for url in &normalized.image_urls {
            let _ = writeln!(output, "{} {url}", paint("image:", "cyan", false, no_color));
        }
    }
    output
}

pub fn render_json(normalized: &NormalizedRequest, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(normalized)?
    } else {
        serde_json::to_string(normalized)?
    };
    Ok(json)
}

#[must_use]
pub fn render_md(normalized: &NormalizedRequest) -> String {
    let mut output = String::from("## Prompt\n\n```text\n");
    output.push_str(&normalized.prompt);
    output.push_str("\n```\n");
    if normalized.has_images() {
        output.push_str("\n## Images\n\n");
        for url in &normalized.image_urls {
            let _ = writeln!(output, "- <{url}>");
        }
    }
    output
}
