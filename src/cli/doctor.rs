//! Doctor command implementation.

use crate::cli::args::{DoctorArgs, OutputFormat};
use crate::core::doctor::{Doctor, DoctorReport};
use crate::core::provider::ProviderId;
use crate::error::{ExitCode, GatewayError, Result};
use crate::render;
use crate::storage::config::GatewayConfig;

/// Apply `--provider` on top of the resolved configuration.
///
/// Unlike `CODEX_PROVIDER`, an explicit flag with an unknown name is an error
/// rather than a silent fallback to `auto`.
pub fn apply_provider_override(config: GatewayConfig, args: &DoctorArgs) -> Result<GatewayConfig> {
    let Some(raw) = args.provider.as_deref() else {
        return Ok(config);
    };
    let provider = ProviderId::normalize(Some(raw));
    if provider.is_auto() && !matches!(raw.trim().to_lowercase().as_str(), "" | "auto") {
        return Err(GatewayError::Config(format!(
            "unknown provider '{raw}' (expected auto, codex, gemini, claude, cursor-agent)"
        )));
    }
    Ok(config.with_provider(provider))
}

/// Run the evaluator and render its report.
pub async fn run_report(
    doctor: &Doctor,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<(DoctorReport, String)> {
    let report = doctor.run().await;
    let rendered = render::render_doctor(&report, format, pretty, no_color)?;
    Ok((report, rendered))
}

/// Execute the doctor command. The exit code follows the verdict.
pub async fn execute(
    args: &DoctorArgs,
    config: GatewayConfig,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<ExitCode> {
    let config = apply_provider_override(config, args)?;
    tracing::debug!(provider = %config.provider, "Starting doctor checks");

    let doctor = Doctor::new(config);
    let (report, output) = run_report(&doctor, format, pretty, no_color).await?;

    match format {
        OutputFormat::Json => println!("{output}"),
        OutputFormat::Human | OutputFormat::Md => print!("{output}"),
    }

    Ok(report.exit_code())
}
