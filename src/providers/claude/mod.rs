//! Claude OAuth cache handling.
//!
//! Readiness of Claude in OAuth mode depends on a refresh-or-validate step
//! that may hit the network. That step lives behind [`ClaudeOAuthRefresher`]
//! so the gateway can plug in a real token exchange while this crate ships
//! [`CachedClaudeOAuth`], which validates the cache without any I/O beyond
//! the local filesystem.
//!
//! Two cache layouts are accepted: a flat document
//! (`access_token`/`refresh_token`/`expires_at`, snake or camel case) and
//! the Claude CLI layout that nests the same fields under `claudeAiOauth`.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Tokens are treated as expired this long before `expires_at`.
const EXPIRY_SKEW_MS: i64 = 60_000;

/// Credential artifact exposed by the Claude OAuth cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeOAuthCredentials {
    #[serde(default, alias = "accessToken")]
    pub access_token: Option<String>,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
    /// Expiry in epoch milliseconds.
    #[serde(default, alias = "expiresAt")]
    pub expires_at: Option<i64>,
}

impl ClaudeOAuthCredentials {
    /// Non-empty access token present.
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Non-empty refresh token present.
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether either token is present.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.has_access_token() || self.has_refresh_token()
    }

    /// Expiry as a timestamp.
    #[must_use]
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at.and_then(DateTime::from_timestamp_millis)
    }

    /// Whether the access token is expired (with skew) at `now_ms`.
    ///
    /// Credentials without an expiry never expire.
    #[must_use]
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at
            .is_some_and(|exp| now_ms.saturating_add(EXPIRY_SKEW_MS) >= exp)
    }
}

/// Parse a Claude OAuth cache document in either supported layout.
///
/// # Errors
///
/// Returns the JSON error when the document is malformed.
pub fn parse_claude_oauth(content: &str) -> serde_json::Result<ClaudeOAuthCredentials> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if let Some(nested) = value.get("claudeAiOauth") {
        return serde_json::from_value(nested.clone());
    }
    serde_json::from_value(value)
}

/// Read the cache at `path`.
///
/// # Errors
///
/// Returns [`GatewayError::CredentialsMissing`] if the file does not exist and
/// [`GatewayError::CredentialsInvalid`] if it cannot be parsed.
pub fn read_claude_oauth(path: &Path) -> Result<ClaudeOAuthCredentials> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GatewayError::CredentialsMissing {
                path: path.to_path_buf(),
            }
        } else {
            GatewayError::Io(e)
        }
    })?;
    parse_claude_oauth(&content).map_err(|e| GatewayError::CredentialsInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Refresh Collaborator
// =============================================================================

/// Refresh-or-validate step for a cached Claude OAuth credential.
///
/// Implementations may perform network I/O. They must not panic; every
/// failure is reported through the returned `Result`.
#[async_trait]
pub trait ClaudeOAuthRefresher: Send + Sync {
    /// Return a credential that is usable now, refreshing it if needed.
    async fn refresh(&self, path: &Path) -> Result<ClaudeOAuthCredentials>;
}

/// Validates the cached credential without contacting the token endpoint.
///
/// An expired access token is accepted as long as a refresh token is present,
/// because the serving path can exchange it on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct CachedClaudeOAuth;

#[async_trait]
impl ClaudeOAuthRefresher for CachedClaudeOAuth {
    async fn refresh(&self, path: &Path) -> Result<ClaudeOAuthCredentials> {
        let creds = read_claude_oauth(path)?;
        if !creds.is_usable() {
            return Err(GatewayError::CredentialsInvalid {
                path: path.to_path_buf(),
                reason: "no access or refresh token".to_string(),
            });
        }
        let now_ms = Utc::now().timestamp_millis();
        if creds.is_expired_at(now_ms) && !creds.has_refresh_token() {
            return Err(GatewayError::AuthExpired {
                provider: "claude".to_string(),
            });
        }
        if let Some(expires_at) = creds.expires_at_utc() {
            tracing::debug!(path = %path.display(), %expires_at, "Claude OAuth cache validated");
        }
        Ok(creds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAR_FUTURE_MS: i64 = 4_102_444_800_000; // 2100-01-01

    #[test]
    fn parses_flat_snake_case() {
        let creds = parse_claude_oauth(
            r#"{"access_token": "sk-ant-oat", "refresh_token": "sk-ant-ort", "expires_at": 1}"#,
        )
        .unwrap();
        assert!(creds.has_access_token());
        assert!(creds.has_refresh_token());
        assert_eq!(creds.expires_at, Some(1));
    }

    #[test]
    fn parses_nested_cli_layout() {
        let creds = parse_claude_oauth(
            r#"{"claudeAiOauth": {"accessToken": "a", "refreshToken": "r", "expiresAt": 42, "scopes": []}}"#,
        )
        .unwrap();
        assert_eq!(creds.access_token.as_deref(), Some("a"));
        assert_eq!(creds.refresh_token.as_deref(), Some("r"));
        assert_eq!(creds.expires_at, Some(42));
    }

    #[test]
    fn expiry_uses_skew() {
        let creds = ClaudeOAuthCredentials {
            expires_at: Some(100_000),
            ..Default::default()
        };
        assert!(!creds.is_expired_at(0));
        assert!(creds.is_expired_at(40_000));
        assert!(!ClaudeOAuthCredentials::default().is_expired_at(i64::MAX));
    }

    #[tokio::test]
    async fn cached_refresher_returns_valid_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oauth_creds.json");
        fs::write(
            &path,
            format!(r#"{{"access_token": "a", "refresh_token": "r", "expires_at": {FAR_FUTURE_MS}}}"#),
        )
        .unwrap();
        let creds = CachedClaudeOAuth.refresh(&path).await.unwrap();
        assert!(creds.is_usable());
    }

    #[tokio::test]
    async fn cached_refresher_accepts_expired_token_with_refresh_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oauth_creds.json");
        fs::write(
            &path,
            r#"{"access_token": "old", "refresh_token": "r", "expires_at": 1}"#,
        )
        .unwrap();
        assert!(CachedClaudeOAuth.refresh(&path).await.is_ok());
    }

    #[tokio::test]
    async fn cached_refresher_rejects_expired_without_refresh_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oauth_creds.json");
        fs::write(&path, r#"{"access_token": "old", "expires_at": 1}"#).unwrap();
        let err = CachedClaudeOAuth.refresh(&path).await.unwrap_err();
        assert!(matches!(err, GatewayError::AuthExpired { .. }));
    }

    #[tokio::test]
    async fn cached_refresher_rejects_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oauth_creds.json");
        fs::write(&path, r#"{"claudeAiOauth": {"accessToken": ""}}"#).unwrap();
        let err = CachedClaudeOAuth.refresh(&path).await.unwrap_err();
        assert!(err.to_string().contains("no access or refresh token"));
    }

    #[tokio::test]
    async fn cached_refresher_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oauth_creds.json");
        fs::write(&path, "garbage").unwrap();
        let err = CachedClaudeOAuth.refresh(&path).await.unwrap_err();
        assert!(matches!(err, GatewayError::CredentialsInvalid { .. }));
    }
}
