//! Test utilities for agent-cli-to-api.
//!
//! Fake collaborators for the readiness evaluator, credential cache fixtures,
//! and assertion macros shared by unit and integration tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use agent_cli_to_api::test_utils::*;
//!
//! let home = GatewayHome::new();
//! home.write_codex_auth(CODEX_AUTH_TOKENS);
//! let doctor = Doctor::new(home.config(ProviderId::Codex, FeatureFlags::default()))
//!     .with_locator(StaticLocator::with(&["codex"]));
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::locator::BinaryLocator;
use crate::core::provider::ProviderId;
use crate::error::{GatewayError, Result};
use crate::providers::claude::{ClaudeOAuthCredentials, ClaudeOAuthRefresher};
use crate::storage::config::{FeatureFlags, GatewayConfig};

// =============================================================================
// Fixture Documents
// =============================================================================

/// Codex `auth.json` with OAuth tokens.
pub const CODEX_AUTH_TOKENS: &str = r#"{
  "OPENAI_API_KEY": null,
  "tokens": {
    "id_token": "eyJ.id",
    "access_token": "eyJ.access",
    "refresh_token": "rt_123",
    "account_id": "acct_1"
  },
  "last_refresh": "2026-01-01T00:00:00Z"
}"#;

/// Codex `auth.json` with only an API key.
pub const CODEX_AUTH_API_KEY: &str = r#"{"OPENAI_API_KEY": "sk-test"}"#;

/// Codex `auth.json` with nothing usable.
pub const CODEX_AUTH_EMPTY: &str = r#"{"OPENAI_API_KEY": null, "tokens": null}"#;

/// Gemini CLI OAuth cache.
pub const GEMINI_CREDS: &str = r#"{
  "access_token": "ya29.token",
  "refresh_token": "1//refresh",
  "scope": "https://www.googleapis.com/auth/cloud-platform",
  "token_type": "Bearer",
  "expiry_date": 4102444800000
}"#;

/// Claude OAuth cache in the CLI's nested layout, valid until 2100.
pub const CLAUDE_CREDS: &str = r#"{
  "claudeAiOauth": {
    "accessToken": "sk-ant-oat01-test",
    "refreshToken": "sk-ant-ort01-test",
    "expiresAt": 4102444800000,
    "scopes": ["user:inference"]
  }
}"#;

// =============================================================================
// Fake Collaborators
// =============================================================================

/// Binary locator backed by a fixed table.
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    binaries: BTreeMap<String, PathBuf>,
}

impl StaticLocator {
    /// Locator that finds nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Locator that finds each name under `/usr/local/bin`.
    #[must_use]
    pub fn with(names: &[&str]) -> Self {
        let binaries = names
            .iter()
            .map(|name| ((*name).to_string(), Path::new("/usr/local/bin").join(name)))
            .collect();
        Self { binaries }
    }

    /// Locator that finds every backend CLI.
    #[must_use]
    pub fn all_backends() -> Self {
        let names: Vec<&str> = ProviderId::BACKENDS
            .iter()
            .filter_map(|p| p.binary_name())
            .collect();
        Self::with(&names)
    }
}

impl BinaryLocator for StaticLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.binaries.get(program).cloned()
    }
}

/// Refresher that always fails with the given reason and counts calls.
#[derive(Debug, Clone)]
pub struct FailingRefresher {
    reason: String,
    calls: Arc<AtomicUsize>,
}

impl FailingRefresher {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter.
    #[must_use]
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ClaudeOAuthRefresher for FailingRefresher {
    async fn refresh(&self, _path: &Path) -> Result<ClaudeOAuthCredentials> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::RefreshFailed {
            provider: "claude".to_string(),
            reason: self.reason.clone(),
        })
    }
}

/// Refresher that returns fixed credentials without reading the cache.
#[derive(Debug, Clone, Default)]
pub struct StaticRefresher {
    credentials: ClaudeOAuthCredentials,
}

impl StaticRefresher {
    #[must_use]
    pub const fn new(credentials: ClaudeOAuthCredentials) -> Self {
        Self { credentials }
    }

    /// Refresher returning a usable access token.
    #[must_use]
    pub fn valid() -> Self {
        Self::new(ClaudeOAuthCredentials {
            access_token: Some("sk-ant-oat01-test".to_string()),
            refresh_token: Some("sk-ant-ort01-test".to_string()),
            expires_at: None,
        })
    }
}

#[async_trait]
impl ClaudeOAuthRefresher for StaticRefresher {
    async fn refresh(&self, _path: &Path) -> Result<ClaudeOAuthCredentials> {
        Ok(self.credentials.clone())
    }
}

// =============================================================================
// Credential Home
// =============================================================================

/// Isolated directory holding credential caches and a workspace.
///
/// Deleted on drop. Paths mirror the real layout: `codex/auth.json`,
/// `gemini/oauth_creds.json`, `claude/oauth_creds.json`, `workspace/`.
pub struct GatewayHome {
    inner: tempfile::TempDir,
}

impl GatewayHome {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    #[must_use]
    pub fn codex_home(&self) -> PathBuf {
        self.path().join("codex")
    }

    #[must_use]
    pub fn gemini_creds_path(&self) -> PathBuf {
        self.path().join("gemini").join("oauth_creds.json")
    }

    #[must_use]
    pub fn claude_creds_path(&self) -> PathBuf {
        self.path().join("claude").join("oauth_creds.json")
    }

    #[must_use]
    pub fn workspace_path(&self) -> PathBuf {
        self.path().join("workspace")
    }

    /// Write a file relative to the home, creating parents.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        write_with_parents(&path, content);
        path
    }

    pub fn write_codex_auth(&self, content: &str) {
        write_with_parents(&self.codex_home().join("auth.json"), content);
    }

    pub fn write_gemini_creds(&self, content: &str) {
        write_with_parents(&self.gemini_creds_path(), content);
    }

    pub fn write_claude_creds(&self, content: &str) {
        write_with_parents(&self.claude_creds_path(), content);
    }

    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    pub fn create_workspace(&self) -> PathBuf {
        let path = self.workspace_path();
        fs::create_dir_all(&path).expect("Failed to create workspace");
        path
    }

    /// Configuration pointing every cache at this home. No workspace.
    #[must_use]
    pub fn config(&self, provider: ProviderId, flags: FeatureFlags) -> GatewayConfig {
        GatewayConfig {
            provider,
            flags,
            workspace: None,
            codex_home: Some(self.codex_home()),
            gemini_oauth_creds: self.gemini_creds_path(),
            claude_oauth_creds: self.claude_creds_path(),
        }
    }

    /// Environment variables equivalent to [`Self::config`], for driving the binary.
    #[must_use]
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("CODEX_CLI_HOME", self.codex_home().display().to_string()),
            (
                "GEMINI_OAUTH_CREDS_PATH",
                self.gemini_creds_path().display().to_string(),
            ),
            (
                "CLAUDE_OAUTH_CREDS_PATH",
                self.claude_creds_path().display().to_string(),
            ),
        ]
    }
}

impl Default for GatewayHome {
    fn default() -> Self {
        Self::new()
    }
}

fn write_with_parents(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(path, content).expect("Failed to write test file");
}

/// Feature flags with Claude OAuth mode on.
#[must_use]
pub const fn claude_oauth_flags() -> FeatureFlags {
    FeatureFlags {
        claude_use_oauth: true,
        gemini_use_cloudcode: false,
    }
}

/// Feature flags with Gemini cloud-code mode on.
#[must_use]
pub const fn gemini_cloudcode_flags() -> FeatureFlags {
    FeatureFlags {
        claude_use_oauth: false,
        gemini_use_cloudcode: true,
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}

/// Assert that a string does NOT contain ANSI escape codes.
#[macro_export]
macro_rules! assert_no_ansi_codes {
    ($text:expr) => {
        let text = $text;
        assert!(
            !text.contains('\x1b'),
            "Expected string to NOT contain ANSI escape codes.\n\nActual string:\n{:?}",
            text
        );
    };
}

/// Strip ANSI escape codes from a string.
#[must_use]
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::codex::load_codex_auth;
    use crate::providers::gemini::load_gemini_creds;

    #[test]
    fn fixtures_parse() {
        let home = GatewayHome::new();
        home.write_codex_auth(CODEX_AUTH_TOKENS);
        home.write_gemini_creds(GEMINI_CREDS);
        assert!(load_codex_auth(Some(&home.codex_home())).is_usable());
        assert!(load_gemini_creds(&home.gemini_creds_path()).unwrap().is_usable());
        assert!(
            crate::providers::claude::parse_claude_oauth(CLAUDE_CREDS)
                .unwrap()
                .is_usable()
        );
    }

    #[test]
    fn empty_codex_fixture_is_unusable() {
        let home = GatewayHome::new();
        home.write_codex_auth(CODEX_AUTH_EMPTY);
        assert!(!load_codex_auth(Some(&home.codex_home())).is_usable());
        home.write_codex_auth(CODEX_AUTH_API_KEY);
        assert!(load_codex_auth(Some(&home.codex_home())).is_usable());
    }

    #[test]
    fn static_locator_lookup() {
        let locator = StaticLocator::all_backends();
        assert!(locator.locate("cursor-agent").is_some());
        assert!(StaticLocator::empty().locate("codex").is_none());
    }

    #[tokio::test]
    async fn failing_refresher_counts_calls() {
        let refresher = FailingRefresher::new("boom");
        let calls = refresher.calls();
        assert!(refresher.refresh(Path::new("/x")).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn strip_ansi() {
        assert_eq!(strip_ansi_codes("\x1b[1;31mFAIL\x1b[0m"), "FAIL");
    }

    #[test]
    fn env_vars_match_config() {
        let home = GatewayHome::new();
        let config = home.config(ProviderId::Auto, FeatureFlags::default());
        let vars = home.env_vars();
        assert_eq!(
            vars[2].1,
            config.claude_oauth_creds.display().to_string()
        );
    }
}
