//! Provider readiness diagnostics.
//!
//! Defines the check and report types. The check plan lives in [`plan`] and
//! the probes plus the evaluator in [`checks`].

pub mod checks;
pub mod plan;

use crate::core::provider::ProviderId;
use crate::error::ExitCode;
use crate::storage::config::FeatureFlags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub use checks::Doctor;
pub use plan::{CheckKind, PlannedCheck};

/// Outcome of one readiness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub ok: bool,
    /// Severity of a failure: FAIL when required, WARN otherwise.
    pub required: bool,
    /// Diagnostic text for humans. Not a stable format.
    pub details: String,
}

impl CheckResult {
    /// Create a check result.
    #[must_use]
    pub fn new(name: impl Into<String>, ok: bool, required: bool, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ok,
            required,
            details: details.into(),
        }
    }

    /// Display status of this check.
    #[must_use]
    pub const fn status(&self) -> CheckStatus {
        CheckStatus::of(self.ok, self.required)
    }
}

/// Display status of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

impl CheckStatus {
    /// FAIL only for failed required checks, WARN for failed optional ones.
    #[must_use]
    pub const fn of(ok: bool, required: bool) -> Self {
        match (ok, required) {
            (true, _) => Self::Ok,
            (false, true) => Self::Fail,
            (false, false) => Self::Warn,
        }
    }

    /// Label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall result of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ok,
    OkWithWarnings,
    Fail,
}

impl Verdict {
    /// Derive the verdict from the two aggregate flags.
    #[must_use]
    pub const fn from_flags(required_failed: bool, warnings: bool) -> Self {
        if required_failed {
            Self::Fail
        } else if warnings {
            Self::OkWithWarnings
        } else {
            Self::Ok
        }
    }

    /// Process exit code for this verdict.
    #[must_use]
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Self::Ok | Self::OkWithWarnings => ExitCode::Success,
            Self::Fail => ExitCode::Failure,
        }
    }

    /// Label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::OkWithWarnings => "OK (with warnings)",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether one backend could serve a request, judged by its gating checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderReadiness {
    pub provider: ProviderId,
    pub ready: bool,
}

/// Complete readiness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReport {
    pub provider: ProviderId,
    pub flags: FeatureFlags,
    /// Checks in plan order.
    pub checks: Vec<CheckResult>,
    /// Readiness of every backend that was evaluated.
    pub readiness: Vec<ProviderReadiness>,
    pub verdict: Verdict,
    pub total_duration: Duration,
}

impl DoctorReport {
    /// Assemble a report and derive its verdict.
    #[must_use]
    pub fn new(
        provider: ProviderId,
        flags: FeatureFlags,
        checks: Vec<CheckResult>,
        readiness: Vec<ProviderReadiness>,
        total_duration: Duration,
    ) -> Self {
        let mut required_failed = checks.iter().any(|c| !c.ok && c.required);
        let warnings = checks.iter().any(|c| !c.ok && !c.required);

        // Auto has no individually required checks; it fails when nothing is ready.
        if provider.is_auto() && !readiness.iter().any(|r| r.ready) {
            required_failed = true;
        }

        Self {
            provider,
            flags,
            checks,
            readiness,
            verdict: Verdict::from_flags(required_failed, warnings),
            total_duration,
        }
    }

    /// Process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        self.verdict.exit_code()
    }

    /// Whether any backend is ready.
    #[must_use]
    pub fn any_ready(&self) -> bool {
        self.readiness.iter().any(|r| r.ready)
    }

    /// Readiness of one backend, if it was evaluated.
    #[must_use]
    pub fn is_ready(&self, provider: ProviderId) -> Option<bool> {
        self.readiness
            .iter()
            .find(|r| r.provider == provider)
            .map(|r| r.ready)
    }

    /// Look up a check by name.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Width of the widest check name.
    #[must_use]
    pub fn name_width(&self) -> usize {
        self.checks.iter().map(|c| c.name.len()).max().unwrap_or(10)
    }
}
