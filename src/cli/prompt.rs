//! Prompt command implementation.

use std::io::Read;
use std::path::Path;

use crate::cli::args::{OutputFormat, PromptArgs};
use crate::error::{GatewayError, Result};
use crate::openai::{ChatCompletionRequest, NormalizedRequest};
use crate::render;

/// Read a request body from `path`, or stdin for `None` / `-`.
///
/// # Errors
///
/// Returns an I/O error when the source cannot be read.
pub fn read_body(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

/// Parse and normalize a request body.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for an empty or malformed body.
pub fn normalize_body(body: &str) -> Result<NormalizedRequest> {
    if body.trim().is_empty() {
        return Err(GatewayError::InvalidRequest("empty request body".to_string()));
    }
    let request = ChatCompletionRequest::from_json(body)?;
    tracing::debug!(
        model = request.model.as_deref().unwrap_or("-"),
        stream = request.stream,
        messages = request.messages.len(),
        "Parsed chat completion request"
    );
    Ok(NormalizedRequest::from_request(&request))
}

/// Execute the prompt command.
pub fn execute(args: &PromptArgs, format: OutputFormat, pretty: bool, no_color: bool) -> Result<()> {
    let body = read_body(args.file.as_deref())?;
    let normalized = normalize_body(&body)?;
    let output = render::render_prompt(&normalized, format, pretty, no_color)?;

    match format {
        OutputFormat::Json => println!("{output}"),
        OutputFormat::Human | OutputFormat::Md => print!("{output}"),
    }
    Ok(())
}
