//! Codex (OpenAI) credential loading.
//!
//! Codex keeps its login state in `<codex home>/auth.json`, either as an
//! API key (`OPENAI_API_KEY`) or as OAuth tokens written by `codex login`.
//! This module only reads that file; refreshing and persisting tokens belong
//! to the Codex CLI.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GatewayError, Result};
use crate::storage::paths::{self, CODEX_AUTH_FILE, DEFAULT_CODEX_HOME};

/// Credential artifact exposed by the Codex auth cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodexAuth {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub api_key: Option<String>,
    pub account_id: Option<String>,
}

impl CodexAuth {
    /// Whether a non-empty access token or API key is present.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        has_value(self.access_token.as_deref()) || has_value(self.api_key.as_deref())
    }
}

/// `auth.json` layout.
#[derive(Debug, Deserialize)]
struct CodexAuthJson {
    #[serde(rename = "OPENAI_API_KEY", alias = "apiKey", default)]
    openai_api_key: Option<String>,
    #[serde(default)]
    tokens: Option<CodexAuthTokens>,
}

#[derive(Debug, Deserialize)]
struct CodexAuthTokens {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    account_id: Option<String>,
}

impl From<CodexAuthJson> for CodexAuth {
    fn from(raw: CodexAuthJson) -> Self {
        let tokens = raw.tokens;
        Self {
            access_token: tokens.as_ref().and_then(|t| t.access_token.clone()),
            refresh_token: tokens.as_ref().and_then(|t| t.refresh_token.clone()),
            account_id: tokens.and_then(|t| t.account_id),
            api_key: raw.openai_api_key,
        }
    }
}

/// Location of `auth.json` for an optional Codex home override.
#[must_use]
pub fn auth_path(codex_home: Option<&Path>) -> Option<PathBuf> {
    match codex_home {
        Some(home) => Some(home.join(CODEX_AUTH_FILE)),
        None => paths::home_dir()
            .map(|home| paths::expand_tilde_with(DEFAULT_CODEX_HOME, Some(&home)).join(CODEX_AUTH_FILE)),
    }
}

/// Parse an `auth.json` file.
///
/// # Errors
///
/// Returns [`GatewayError::CredentialsMissing`] when the file does not exist
/// and [`GatewayError::CredentialsInvalid`] when it is not valid JSON.
pub fn read_codex_auth(path: &Path) -> Result<CodexAuth> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GatewayError::CredentialsMissing {
                path: path.to_path_buf(),
            }
        } else {
            GatewayError::Io(e)
        }
    })?;
    parse_codex_auth(&content).map_err(|e| GatewayError::CredentialsInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse `auth.json` contents.
///
/// # Errors
///
/// Returns the JSON error when the document is malformed.
pub fn parse_codex_auth(content: &str) -> serde_json::Result<CodexAuth> {
    serde_json::from_str::<CodexAuthJson>(content).map(CodexAuth::from)
}

/// Load Codex credentials, treating any read or parse problem as "no credentials".
#[must_use]
pub fn load_codex_auth(codex_home: Option<&Path>) -> CodexAuth {
    let Some(path) = auth_path(codex_home) else {
        tracing::debug!("Cannot resolve Codex home directory");
        return CodexAuth::default();
    };
    match read_codex_auth(&path) {
        Ok(auth) => auth,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Codex auth unavailable");
            CodexAuth::default()
        }
    }
}

fn has_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
