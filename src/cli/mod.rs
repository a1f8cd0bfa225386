//! CLI argument parsing and command dispatch.

pub mod args;
pub mod doctor;
pub mod prompt;

use std::path::{Path, PathBuf};

pub use args::{Cli, Commands, OutputFormat};

use crate::error::{GatewayError, Result};
use crate::storage::config::EnvSource;
use crate::storage::env_file::EnvFile;

/// `.env` file read when no `--env-file` is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Which `.env` file to layer under the process environment, if any.
#[must_use]
pub fn env_file_path(cli: &Cli) -> Option<PathBuf> {
    if cli.no_env {
        return None;
    }
    Some(
        cli.env_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE)),
    )
}

/// Build the environment source for this invocation.
///
/// A missing default `.env` is ignored; a missing explicit `--env-file` is a
/// configuration error.
///
/// # Errors
///
/// Returns [`GatewayError::Config`] for a missing explicit file and
/// [`GatewayError::EnvFile`] when the file cannot be read.
pub fn load_env_source(cli: &Cli) -> Result<EnvSource> {
    let Some(path) = env_file_path(cli) else {
        return Ok(EnvSource::process());
    };
    if cli.env_file.is_some() && !path.is_file() {
        return Err(GatewayError::Config(format!(
            "env file not found: {}",
            path.display()
        )));
    }
    Ok(EnvSource::with_file(EnvFile::load(Path::new(&path))?))
}
