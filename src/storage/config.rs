//! Gateway configuration.
//!
//! The configuration is resolved once at startup into an immutable
//! [`GatewayConfig`] and passed to the readiness evaluator, so probes never
//! read process-wide environment state themselves.
//!
//! ## Precedence
//!
//! 1. CLI flags (applied by the caller after resolution)
//! 2. Process environment
//! 3. `.env` file (only for keys the environment does not define)
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `CODEX_PROVIDER`: provider selection (`auto`, `codex`, `gemini`, `claude`, `cursor-agent`)
//! - `CLAUDE_USE_OAUTH_API`: serve Claude through its OAuth API instead of the CLI
//! - `GEMINI_USE_CLOUDCODE_API`: serve Gemini through the cloud-code API
//! - `CODEX_WORKSPACE`: workspace directory the agents run in
//! - `CODEX_CLI_HOME`: Codex home directory (holds `auth.json`)
//! - `GEMINI_OAUTH_CREDS_PATH`: Gemini OAuth cache file
//! - `CLAUDE_OAUTH_CREDS_PATH`: Claude OAuth cache file

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::env_file::EnvFile;
use super::paths::{self, DEFAULT_CLAUDE_OAUTH_CREDS, DEFAULT_GEMINI_OAUTH_CREDS};
use crate::core::provider::ProviderId;
use crate::util::env::parse_bool;

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Provider selection.
pub const ENV_PROVIDER: &str = "CODEX_PROVIDER";
/// Claude OAuth-mode flag.
pub const ENV_CLAUDE_USE_OAUTH: &str = "CLAUDE_USE_OAUTH_API";
/// Gemini cloud-code-mode flag.
pub const ENV_GEMINI_USE_CLOUDCODE: &str = "GEMINI_USE_CLOUDCODE_API";
/// Workspace directory.
pub const ENV_WORKSPACE: &str = "CODEX_WORKSPACE";
/// Codex home override.
pub const ENV_CODEX_CLI_HOME: &str = "CODEX_CLI_HOME";
/// Gemini OAuth cache override.
pub const ENV_GEMINI_OAUTH_CREDS_PATH: &str = "GEMINI_OAUTH_CREDS_PATH";
/// Claude OAuth cache override.
pub const ENV_CLAUDE_OAUTH_CREDS_PATH: &str = "CLAUDE_OAUTH_CREDS_PATH";
/// `.env` file location.
pub const ENV_ENV_FILE: &str = "CODEX_ENV_FILE";

// =============================================================================
// Environment Source
// =============================================================================

/// Process environment layered over an optional `.env` file.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    file: EnvFile,
}

impl EnvSource {
    /// Environment only.
    #[must_use]
    pub fn process() -> Self {
        Self::default()
    }

    /// Environment with `.env` fallbacks.
    #[must_use]
    pub const fn with_file(file: EnvFile) -> Self {
        Self { file }
    }

    /// Look up a key: process environment first, then the `.env` file.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| self.file.get(key).map(str::to_string))
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Mode switches that change which checks gate readiness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    /// Claude is served through the OAuth API rather than the `claude` CLI.
    pub claude_use_oauth: bool,
    /// Gemini is served through the cloud-code API.
    pub gemini_use_cloudcode: bool,
}

/// Immutable configuration consumed by the readiness evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Requested provider.
    pub provider: ProviderId,
    /// Active feature flags.
    pub flags: FeatureFlags,
    /// Workspace directory, when configured.
    pub workspace: Option<PathBuf>,
    /// Codex home override; `None` means `~/.codex`.
    pub codex_home: Option<PathBuf>,
    /// Gemini OAuth cache file.
    pub gemini_oauth_creds: PathBuf,
    /// Claude OAuth cache file.
    pub claude_oauth_creds: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: ProviderId::Auto,
            flags: FeatureFlags::default(),
            workspace: None,
            codex_home: None,
            gemini_oauth_creds: paths::expand_tilde(DEFAULT_GEMINI_OAUTH_CREDS),
            claude_oauth_creds: paths::expand_tilde(DEFAULT_CLAUDE_OAUTH_CREDS),
        }
    }
}

impl GatewayConfig {
    /// Resolve from the process environment plus an optional `.env` layer.
    #[must_use]
    pub fn from_env(source: &EnvSource) -> Self {
        Self::from_lookup(|key| source.get(key))
    }

    /// Resolve from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_lookup_with_home(lookup, paths::home_dir().as_deref())
    }

    /// Resolve from a key lookup, expanding `~` against `home`.
    #[must_use]
    pub fn from_lookup_with_home(
        lookup: impl Fn(&str) -> Option<String>,
        home: Option<&Path>,
    ) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let path_or = |key: &str, default: &str| {
            let raw = non_empty(key).unwrap_or_else(|| default.to_string());
            paths::expand_tilde_with(raw.trim(), home)
        };

        let config = Self {
            provider: ProviderId::normalize(lookup(ENV_PROVIDER).as_deref()),
            flags: FeatureFlags {
                claude_use_oauth: parse_bool(lookup(ENV_CLAUDE_USE_OAUTH).as_deref(), false),
                gemini_use_cloudcode: parse_bool(
                    lookup(ENV_GEMINI_USE_CLOUDCODE).as_deref(),
                    false,
                ),
            },
            workspace: non_empty(ENV_WORKSPACE)
                .map(|raw| paths::expand_tilde_with(raw.trim(), home)),
            codex_home: non_empty(ENV_CODEX_CLI_HOME)
                .map(|raw| paths::expand_tilde_with(raw.trim(), home)),
            gemini_oauth_creds: path_or(ENV_GEMINI_OAUTH_CREDS_PATH, DEFAULT_GEMINI_OAUTH_CREDS),
            claude_oauth_creds: path_or(ENV_CLAUDE_OAUTH_CREDS_PATH, DEFAULT_CLAUDE_OAUTH_CREDS),
        };

        tracing::debug!(
            provider = %config.provider,
            claude_use_oauth = config.flags.claude_use_oauth,
            gemini_use_cloudcode = config.flags.gemini_use_cloudcode,
            workspace = ?config.workspace,
            "Resolved gateway configuration"
        );

        config
    }

    /// Replace the provider selection (CLI override).
    #[must_use]
    pub const fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = provider;
        self
    }
}
