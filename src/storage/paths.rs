//! Credential cache locations.

use std::path::{Path, PathBuf};

/// Default Codex home (holds `auth.json`).
pub const DEFAULT_CODEX_HOME: &str = "~/.codex";
/// Default Gemini OAuth cache.
pub const DEFAULT_GEMINI_OAUTH_CREDS: &str = "~/.gemini/oauth_creds.json";
/// Default Claude OAuth cache.
pub const DEFAULT_CLAUDE_OAUTH_CREDS: &str = "~/.claude/oauth_creds.json";

/// File name of the Codex auth cache inside the Codex home.
pub const CODEX_AUTH_FILE: &str = "auth.json";

/// Resolve the user's home directory.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

/// Expand a leading `~` to the home directory.
///
/// Paths without a leading `~`, or when the home directory cannot be
/// resolved, are returned unchanged.
#[must_use]
pub fn expand_tilde(raw: &str) -> PathBuf {
    expand_tilde_with(raw, home_dir().as_deref())
}

/// Expand a leading `~` against an explicit home directory.
#[must_use]
pub fn expand_tilde_with(raw: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(raw);
    };
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}
