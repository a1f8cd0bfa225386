//! Error types for agent-cli-to-api.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! - **Authentication**: credential caches that are missing, unreadable, or expired
//! - **Configuration**: invalid flags, unreadable `.env` files, malformed requests
//! - **Internal**: I/O, JSON, and unclassified errors
//!
//! Readiness probes never surface these errors to their caller. A probe that
//! hits one of them folds the message into a failed check instead; only the
//! CLI layer turns a [`GatewayError`] into a process exit code.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Credential caches (missing, invalid, expired).
    Authentication,
    /// Configuration and request-shape issues.
    Configuration,
    /// Bugs, I/O, and unclassified errors.
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication error",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Authentication => "A",
            Self::Configuration => "C",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success, or success with warnings.
    Success = 0,
    /// A required readiness check failed, or a command failed.
    Failure = 1,
    /// Invalid input or configuration.
    Usage = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Main error type.
#[derive(Error, Debug)]
pub enum GatewayError {
    // ==========================================================================
    // Authentication errors
    // ==========================================================================
    /// Credential cache file does not exist.
    #[error("credential cache not found: {}", path.display())]
    CredentialsMissing { path: PathBuf },

    /// Credential cache exists but cannot be parsed.
    #[error("invalid credential cache {}: {reason}", path.display())]
    CredentialsInvalid { path: PathBuf, reason: String },

    /// Access token expired and no refresh token is available.
    #[error("access token for {provider} expired and no refresh token is available")]
    AuthExpired { provider: String },

    /// A credential refresh collaborator reported a failure.
    #[error("{provider} token refresh failed: {reason}")]
    RefreshFailed { provider: String, reason: String },

    // ==========================================================================
    // Configuration errors
    // ==========================================================================
    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// `.env` file could not be read.
    #[error("cannot read env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Chat request payload is not a valid request document.
    #[error("invalid chat request: {0}")]
    InvalidRequest(String),

    // ==========================================================================
    // Internal errors
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GatewayError {
    /// Map error to a process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) | Self::EnvFile { .. } | Self::InvalidRequest(_) => ExitCode::Usage,
            Self::CredentialsMissing { .. }
            | Self::CredentialsInvalid { .. }
            | Self::AuthExpired { .. }
            | Self::RefreshFailed { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => ExitCode::Failure,
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::CredentialsMissing { .. }
            | Self::CredentialsInvalid { .. }
            | Self::AuthExpired { .. }
            | Self::RefreshFailed { .. } => ErrorCategory::Authentication,
            Self::Config(_) | Self::EnvFile { .. } | Self::InvalidRequest(_) => {
                ErrorCategory::Configuration
            }
            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `ACA-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CredentialsMissing { .. } => "ACA-A001",
            Self::CredentialsInvalid { .. } => "ACA-A002",
            Self::AuthExpired { .. } => "ACA-A003",
            Self::RefreshFailed { .. } => "ACA-A004",
            Self::Config(_) => "ACA-C001",
            Self::EnvFile { .. } => "ACA-C002",
            Self::InvalidRequest(_) => "ACA-C003",
            Self::Io(_) => "ACA-X001",
            Self::Json(_) => "ACA-X002",
            Self::Other(_) => "ACA-X099",
        }
    }
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_with_usage_code() {
        let err = GatewayError::Config("bad flag".to_string());
        assert_eq!(err.exit_code(), ExitCode::Usage);
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.error_code(), "ACA-C001");
    }

    #[test]
    fn credential_errors_are_authentication() {
        let err = GatewayError::CredentialsMissing {
            path: PathBuf::from("/tmp/creds.json"),
        };
        assert_eq!(err.category(), ErrorCategory::Authentication);
        assert!(err.to_string().contains("/tmp/creds.json"));
        assert_eq!(err.exit_code(), ExitCode::Failure);
    }

    #[test]
    fn error_codes_carry_category_prefix() {
        let errors = [
            GatewayError::AuthExpired {
                provider: "claude".to_string(),
            },
            GatewayError::RefreshFailed {
                provider: "claude".to_string(),
                reason: "invalid_grant".to_string(),
            },
            GatewayError::InvalidRequest("missing messages".to_string()),
            GatewayError::Io(std::io::Error::other("boom")),
        ];
        for err in &errors {
            let expected = format!("ACA-{}", err.category().code_prefix());
            assert!(err.error_code().starts_with(&expected), "{err:?}");
        }
    }

    #[test]
    fn exit_code_converts_to_i32() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Failure), 1);
        assert_eq!(i32::from(ExitCode::Usage), 2);
    }
}
