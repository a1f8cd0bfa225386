//! Output rendering for human and machine formats.

pub mod doctor;
pub mod error;
pub mod prompt;

use rich_rust::{Color, ColorSystem, Style};

use crate::cli::args::OutputFormat;
use crate::core::doctor::DoctorReport;
use crate::error::Result;
use crate::openai::NormalizedRequest;

pub use error::{render_error, render_error_json};

/// Render a doctor report.
pub fn render_doctor(
    report: &DoctorReport,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => doctor::render_human(report, no_color),
        OutputFormat::Json => doctor::render_json(report, pretty),
        OutputFormat::Md => doctor::render_md(report),
    }
}

/// Render a normalized chat request.
pub fn render_prompt(
    normalized: &NormalizedRequest,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(prompt::render_human(normalized, no_color)),
        OutputFormat::Json => prompt::render_json(normalized, pretty),
        OutputFormat::Md => Ok(prompt::render_md(normalized)),
    }
}

/// Style `text` with a named color. Plain text when `no_color` is set or the
/// color name does not parse.
pub(crate) fn paint(text: &str, color: &str, bold: bool, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }
    let mut style = Style::new();
    if bold {
        style = style.bold();
    }
    if let Ok(color) = Color::parse(color) {
        style = style.color(color);
    }
    style.render(text, ColorSystem::TrueColor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_without_color_is_identity() {
        assert_eq!(paint("FAIL", "red", true, true), "FAIL");
    }

    #[test]
    fn paint_with_color_wraps_text() {
        let painted = paint("OK", "green", false, false);
        assert_ne!(painted, "OK");
        assert_eq!(crate::test_utils::strip_ansi_codes(&painted), "OK");
    }
}
