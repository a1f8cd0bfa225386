//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::storage::config::ENV_ENV_FILE;

/// Readiness checks and request normalization for the agent CLI gateway.
#[derive(Parser, Debug)]
#[command(name = "agent-cli-to-api")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load settings from this .env file instead of ./.env
    #[arg(long, value_name = "PATH", env = ENV_ENV_FILE, global = true)]
    pub env_file: Option<PathBuf>,

    /// Do not load any .env file (wins over --env-file)
    #[arg(long, global = true)]
    pub no_env: bool,
}

impl Cli {
    /// Resolve the effective output format.
    #[must_use]
    pub const fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the selected provider can serve requests
    Doctor(DoctorArgs),

    /// Flatten a chat completion request into a CLI prompt
    Prompt(PromptArgs),
}

/// Arguments for the `doctor` command.
#[derive(Args, Debug, Default)]
pub struct DoctorArgs {
    /// Provider to check (auto, codex, gemini, claude, cursor-agent). Overrides CODEX_PROVIDER.
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,
}

/// Arguments for the `prompt` command.
#[derive(Args, Debug, Default)]
pub struct PromptArgs {
    /// Request body file; reads stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Md,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn doctor_with_provider() {
        let cli = Cli::try_parse_from(["agent-cli-to-api", "doctor", "--provider", "claude"]).unwrap();
        match cli.command {
            Some(Commands::Doctor(args)) => assert_eq!(args.provider.as_deref(), Some("claude")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "agent-cli-to-api",
            "doctor",
            "--json",
            "--pretty",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(cli.effective_format(), OutputFormat::Json);
        assert!(cli.pretty);
        assert!(cli.no_color);
    }

    #[test]
    fn prompt_reads_optional_file() {
        let cli = Cli::try_parse_from(["agent-cli-to-api", "prompt", "req.json"]).unwrap();
        match cli.command {
            Some(Commands::Prompt(args)) => {
                assert_eq!(args.file, Some(PathBuf::from("req.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn format_md() {
        let cli = Cli::try_parse_from(["agent-cli-to-api", "--format", "md"]).unwrap();
        assert_eq!(cli.effective_format(), OutputFormat::Md);
        assert!(cli.command.is_none());
    }

    #[test]
    fn env_file_flag() {
        let cli =
            Cli::try_parse_from(["agent-cli-to-api", "--env-file", "x.env", "--no-env"]).unwrap();
        assert_eq!(cli.env_file, Some(PathBuf::from("x.env")));
        assert!(cli.no_env);
    }
}
