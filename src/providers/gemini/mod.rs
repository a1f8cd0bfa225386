//! Gemini OAuth cache loading.
//!
//! The Gemini CLI stores its Google OAuth tokens in
//! `~/.gemini/oauth_creds.json` with `expiry_date` in epoch milliseconds.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{GatewayError, Result};

/// Credential artifact exposed by the Gemini OAuth cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeminiCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

impl GeminiCredentials {
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
}

#[derive(Debug, Deserialize)]
struct GeminiCredsJson {
    #[serde(default, alias = "accessToken")]
    access_token: Option<String>,
    #[serde(default, alias = "refreshToken")]
    refresh_token: Option<String>,
    #[serde(default, alias = "expiryDate", deserialize_with = "lenient_millis")]
    expiry_date: Option<i64>,
}

/// Some writers emit the expiry as a float; anything non-numeric is ignored.
fn lenient_millis<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    #[allow(clippy::cast_possible_truncation)]
    let millis = value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64));
    Ok(millis)
}

/// Parse OAuth cache contents.
///
/// # Errors
///
/// Returns the JSON error when the document is malformed.
pub fn parse_gemini_creds(content: &str) -> serde_json::Result<GeminiCredentials> {
    let raw: GeminiCredsJson = serde_json::from_str(content)?;
    Ok(GeminiCredentials {
        access_token: raw.access_token,
        refresh_token: raw.refresh_token,
        expiry: raw.expiry_date.and_then(DateTime::from_timestamp_millis),
    })
}

/// Load the Gemini OAuth cache at `path`.
///
/// # Errors
///
/// Returns [`GatewayError::CredentialsMissing`] if the file does not exist and
/// [`GatewayError::CredentialsInvalid`] if it cannot be parsed.
pub fn load_gemini_creds(path: &Path) -> Result<GeminiCredentials> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GatewayError::CredentialsMissing {
                path: path.to_path_buf(),
            }
        } else {
            GatewayError::Io(e)
        }
    })?;
    parse_gemini_creds(&content).map_err(|e| GatewayError::CredentialsInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gemini_cli_cache() {
        let creds = parse_gemini_creds(
            r#"{
                "access_token": "ya29.token",
                "refresh_token": "1//refresh",
                "scope": "https://www.googleapis.com/auth/cloud-platform",
                "token_type": "Bearer",
                "expiry_date": 1760000000000
            }"#,
        )
        .unwrap();
        assert!(creds.has_access_token());
        assert!(creds.has_refresh_token());
        assert_eq!(creds.expiry.map(|e| e.timestamp()), Some(1_760_000_000));
    }

    #[test]
    fn float_expiry_is_accepted() {
        let creds =
            parse_gemini_creds(r#"{"access_token": "a", "expiry_date": 1.76e12}"#).unwrap();
        assert!(creds.is_usable());
        assert_eq!(creds.expiry.map(|e| e.timestamp()), Some(1_760_000_000));
    }

    #[test]
    fn unreadable_expiry_is_dropped() {
        for expiry in [r#""soon""#, "null", "{}"] {
            let body = format!(r#"{{"refresh_token": "r", "expiryDate": {expiry}}}"#);
            let creds = parse_gemini_creds(&body).unwrap();
            assert!(creds.is_usable());
            assert_eq!(creds.expiry, None);
        }
    }

    #[test]
    fn refresh_token_alone_is_usable() {
        let creds = parse_gemini_creds(r#"{"refresh_token": "r"}"#).unwrap();
        assert!(!creds.has_access_token());
        assert!(creds.is_usable());
    }

    #[test]
    fn empty_tokens_are_not_usable() {
        let creds = parse_gemini_creds(r#"{"access_token": "", "refresh_token": null}"#).unwrap();
        assert!(!creds.is_usable());
    }

    #[test]
    fn load_reports_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oauth_creds.json");
        assert!(matches!(
            load_gemini_creds(&path),
            Err(GatewayError::CredentialsMissing { .. })
        ));

        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            load_gemini_creds(&path),
            Err(GatewayError::CredentialsInvalid { .. })
        ));
    }
}
