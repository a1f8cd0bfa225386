//! agent-cli-to-api
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use clap::Parser;

use agent_cli_to_api::cli::{self, Cli, Commands};
use agent_cli_to_api::core::logging::{self, LogSettings};
use agent_cli_to_api::error;
use agent_cli_to_api::storage::config::GatewayConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = LogSettings::from_process(cli.log_level.as_deref(), cli.json_output, cli.verbose);
    logging::init(&settings);

    let format = cli.effective_format();
    let no_color = cli.no_color;
    let pretty = cli.pretty;

    match run(cli).await {
        Ok(code) => code.into(),
        Err(e) => {
            tracing::debug!(code = e.error_code(), "command failed: {e}");
            let rendered = agent_cli_to_api::render::render_error(&e, format, no_color, pretty);
            eprintln!("{rendered}");
            e.exit_code().into()
        }
    }
}

async fn run(cli: Cli) -> agent_cli_to_api::Result<error::ExitCode> {
    let format = cli.effective_format();
    let pretty = cli.pretty;
    let no_color = !agent_cli_to_api::util::env::should_use_color(cli.no_color);

    let Some(command) = cli.command.as_ref() else {
        print_quickstart();
        return Ok(error::ExitCode::Success);
    };

    match command {
        Commands::Doctor(args) => {
            let source = cli::load_env_source(&cli)?;
            let config = GatewayConfig::from_env(&source);
            cli::doctor::execute(args, config, format, pretty, no_color).await
        }
        Commands::Prompt(args) => {
            cli::prompt::execute(args, format, pretty, no_color)?;
            Ok(error::ExitCode::Success)
        }
    }
}

/// Print quickstart help when no command is given.
fn print_quickstart() {
    println!(
        r"agent-cli-to-api - readiness checks for the agent CLI gateway

USAGE:
    agent-cli-to-api [OPTIONS] <COMMAND>

COMMANDS:
    doctor          Check that the selected provider can serve requests
    prompt          Flatten a chat completion request into a CLI prompt

QUICK START:
    agent-cli-to-api doctor                       # Check CODEX_PROVIDER (default: auto)
    agent-cli-to-api doctor --provider claude     # Check one provider
    agent-cli-to-api prompt request.json          # Show the prompt a request becomes

ROBOT MODE:
    agent-cli-to-api doctor --json                # JSON report
    agent-cli-to-api doctor --format md           # Markdown report

For more help: agent-cli-to-api --help
"
    );
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
}
