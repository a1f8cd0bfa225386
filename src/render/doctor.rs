//! Doctor report rendering.
//!
//! The human layout is one line per check, name column padded to the widest
//! name, followed by the verdict:
//!
//! ```text
//! agent-cli-to-api doctor
//!
//! - codex binary : OK  /usr/local/bin/codex
//! - Codex auth   : FAIL  missing ~/.codex/auth.json tokens (run `codex login`)
//!
//! Result: FAIL
//! ```

use std::fmt::Write as _;
use std::time::Instant;

use tracing::Level;

use super::paint;
use crate::core::doctor::{CheckStatus, DoctorReport, Verdict};
use crate::error::Result;

const TITLE: &str = "agent-cli-to-api doctor";

// =============================================================================
// Human-Readable Output
// =============================================================================

/// Render a doctor report for a terminal. Only status words are colored.
pub fn render_human(report: &DoctorReport, no_color: bool) -> Result<String> {
    let start = tracing::enabled!(Level::DEBUG).then(Instant::now);
    let width = report.name_width();

    let mut output = String::new();
    let _ = writeln!(output, "{TITLE}\n");
    for check in &report.checks {
        let _ = writeln!(
            output,
            "- {:<width$} : {}  {}",
            check.name,
            paint_status(check.status(), no_color),
            check.details
        );
    }
    let _ = writeln!(output, "\nResult: {}", paint_verdict(report.verdict, no_color));

    if let Some(start) = start {
        tracing::debug!(
            component = "doctor_report",
            checks = report.checks.len(),
            render_time_us = start.elapsed().as_micros(),
            "Rendered doctor report"
        );
    }

    Ok(output)
}

const fn status_color(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Ok => "green",
        CheckStatus::Warn => "yellow",
        CheckStatus::Fail => "red",
    }
}

fn paint_status(status: CheckStatus, no_color: bool) -> String {
    paint(status.label(), status_color(status), false, no_color)
}

fn paint_verdict(verdict: Verdict, no_color: bool) -> String {
    let color = match verdict {
        Verdict::Ok => "green",
        Verdict::OkWithWarnings => "yellow",
        Verdict::Fail => "red",
    };
    paint(verdict.label(), color, true, no_color)
}

// =============================================================================
// JSON Output
// =============================================================================

/// Render a doctor report as JSON.
pub fn render_json(report: &DoctorReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

// =============================================================================
// Markdown Output
// =============================================================================

/// Render a doctor report as Markdown.
pub fn render_md(report: &DoctorReport) -> Result<String> {
    let mut output = String::new();

    let _ = writeln!(output, "# {TITLE}\n");
    let _ = writeln!(output, "- **Provider:** {}", report.provider);
    let _ = writeln!(
        output,
        "- **Claude OAuth API:** {}",
        report.flags.claude_use_oauth
    );
    let _ = writeln!(
        output,
        "- **Gemini cloud-code API:** {}\n",
        report.flags.gemini_use_cloudcode
    );

    output.push_str("| Check | Status | Details |\n|-------|--------|---------|\n");
    for check in &report.checks {
        let _ = writeln!(
            output,
            "| {} | {} | {} |",
            escape_md_cell(&check.name),
            check.status(),
            escape_md_cell(&check.details)
        );
    }

    if !report.readiness.is_empty() {
        output.push_str("\n## Readiness\n\n");
        for entry in &report.readiness {
            let name = entry.provider.display_name();
            if entry.ready {
                let _ = writeln!(output, "- {name}: ready");
            } else {
                let _ = writeln!(
                    output,
                    "- {name}: not ready ({})",
                    entry.provider.install_suggestion()
                );
            }
        }
    }

    let _ = writeln!(output, "\n**Result:** {}", report.verdict);
    Ok(output)
}

fn escape_md_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::doctor::{CheckResult, ProviderReadiness};
    use crate::core::provider::ProviderId;
    use crate::storage::config::FeatureFlags;
    use crate::test_utils::strip_ansi_codes;
    use std::time::Duration;

    fn codex_report() -> DoctorReport {
        DoctorReport::new(
            ProviderId::Codex,
            FeatureFlags::default(),
            vec![
                CheckResult::new("codex binary", true, true, "/usr/local/bin/codex"),
                CheckResult::new(
                    "Codex auth",
                    false,
                    true,
                    "missing ~/.codex/auth.json tokens (run `codex login`)",
                ),
            ],
            vec![ProviderReadiness {
                provider: ProviderId::Codex,
                ready: false,
            }],
            Duration::from_millis(3),
        )
    }

    #[test]
    fn human_layout_pads_names() {
        let out = render_human(&codex_report(), true).unwrap();
        let expected = "agent-cli-to-api doctor\n\
                        \n\
                        - codex binary : OK  /usr/local/bin/codex\n\
                        - Codex auth   : FAIL  missing ~/.codex/auth.json tokens (run `codex login`)\n\
                        \n\
                        Result: FAIL\n";
        crate::assert_no_ansi_codes!(&out);
        assert_eq!(out, expected);
    }

    #[test]
    fn human_warns_for_optional_failures() {
        let report = DoctorReport::new(
            ProviderId::Claude,
            FeatureFlags::default(),
            vec![
                CheckResult::new("claude binary", true, true, "/bin/claude"),
                CheckResult::new("Claude OAuth cache", false, false, "missing: /x"),
            ],
            vec![],
            Duration::ZERO,
        );
        let out = render_human(&report, true).unwrap();
        assert!(out.contains("- Claude OAuth cache : WARN  missing: /x\n"));
        assert!(out.ends_with("Result: OK (with warnings)\n"));
    }

    #[test]
    fn human_color_keeps_text() {
        let colored = render_human(&codex_report(), false).unwrap();
        let plain = render_human(&codex_report(), true).unwrap();
        crate::assert_no_ansi_codes!(&plain);
        assert_ne!(colored, plain);
        assert_eq!(strip_ansi_codes(&colored), plain);
        crate::assert_contains!(&colored, "/usr/local/bin/codex");
    }

    #[test]
    fn json_roundtrips_fields() {
        let out = render_json(&codex_report(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["verdict"], "fail");
        assert_eq!(value["checks"][1]["name"], "Codex auth");
        assert_eq!(value["checks"][1]["ok"], false);
        assert_eq!(value["readiness"][0]["ready"], false);
        assert!(!out.contains('\n'));
        assert!(render_json(&codex_report(), true).unwrap().contains('\n'));
    }

    #[test]
    fn markdown_table() {
        let out = render_md(&codex_report()).unwrap();
        assert!(out.starts_with("# agent-cli-to-api doctor\n"));
        assert!(out.contains("| codex binary | OK | /usr/local/bin/codex |"));
        assert!(out.contains("- Codex: not ready (Install with: npm install -g @openai/codex)"));
        assert!(out.contains("**Result:** FAIL"));
    }

    #[test]
    fn markdown_escapes_pipes() {
        assert_eq!(escape_md_cell("a|b\nc"), "a\\|b c");
    }
}
