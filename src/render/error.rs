//! Error rendering.
//!
//! Human output is a single `error[CODE]: message` line plus an optional
//! hint; JSON and Markdown formats emit the OpenAI-style error envelope so
//! scripts can parse failures the same way they parse gateway responses.

use crate::cli::args::OutputFormat;
use crate::error::GatewayError;
use crate::openai::ErrorResponse;

use super::paint;

/// Render an error for stderr.
#[must_use]
pub fn render_error(error: &GatewayError, format: OutputFormat, no_color: bool, pretty: bool) -> String {
    match format {
        OutputFormat::Json => render_error_json(error, pretty),
        OutputFormat::Md => render_error_json(error, true),
        OutputFormat::Human => {
            let use_color = !no_color && crate::util::env::stderr_is_tty();
            render_simple(error, !use_color)
        }
    }
}

/// Render an error as an `{"error": {...}}` envelope.
#[must_use]
pub fn render_error_json(error: &GatewayError, pretty: bool) -> String {
    let body = ErrorResponse::from(error);
    let rendered = if pretty {
        serde_json::to_string_pretty(&body)
    } else {
        serde_json::to_string(&body)
    };
    rendered.unwrap_or_else(|_| render_simple(error, true))
}

fn render_simple(error: &GatewayError, no_color: bool) -> String {
    let label = paint(&format!("error[{}]", error.error_code()), "red", true, no_color);
    let mut out = format!("{label}: {error}");
    if let Some(hint) = hint(error) {
        out.push_str("\n  ");
        out.push_str(&paint("hint:", "cyan", false, no_color));
        out.push(' ');
        out.push_str(hint);
    }
    out
}

/// One-line remediation for errors an operator can fix.
#[must_use]
pub const fn hint(error: &GatewayError) -> Option<&'static str> {
    match error {
        GatewayError::CredentialsMissing { .. } => {
            Some("log in with the provider CLI or set the matching *_CREDS_PATH variable")
        }
        GatewayError::AuthExpired { .. } => Some("run `claude setup-token` to mint a new token"),
        GatewayError::EnvFile { .. } => Some("check the --env-file path or pass --no-env"),
        GatewayError::InvalidRequest(_) => {
            Some("expected a chat completion body with a `messages` list")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_error_has_code_and_hint() {
        let err = GatewayError::InvalidRequest("missing field `messages`".to_string());
        let out = render_error(&err, OutputFormat::Human, true, false);
        assert!(out.starts_with("error[ACA-C003]: invalid chat request: missing field `messages`"));
        assert!(out.contains("hint: expected a chat completion body"));
    }

    #[test]
    fn errors_without_hint_are_one_line() {
        let err = GatewayError::Config("bad".to_string());
        let out = render_error(&err, OutputFormat::Human, true, false);
        assert_eq!(out, "error[ACA-C001]: configuration error: bad");
    }

    #[test]
    fn json_error_envelope() {
        let err = GatewayError::CredentialsInvalid {
            path: "/tmp/creds.json".into(),
            reason: "expected value".to_string(),
        };
        let out = render_error(&err, OutputFormat::Json, true, false);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["error"]["code"], "ACA-A002");
        assert_eq!(value["error"]["type"], "authentication_error");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn markdown_errors_are_pretty_json() {
        let err = GatewayError::Config("bad".to_string());
        let out = render_error(&err, OutputFormat::Md, true, false);
        assert!(out.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }
}
