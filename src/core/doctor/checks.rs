//! Readiness probes and the evaluator that runs them.
//!
//! Every distinct probe in a plan runs once, concurrently, and the results
//! are assembled back into plan order. Probes never fail the evaluation: a
//! probe that hits an error reports a failed check with the error in its
//! details.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use futures::future::join_all;

use super::plan::{self, CheckKind};
use super::{CheckResult, DoctorReport, ProviderReadiness};
use crate::core::locator::{BinaryLocator, PathLocator};
use crate::error::GatewayError;
use crate::providers::claude::{CachedClaudeOAuth, ClaudeOAuthRefresher};
use crate::providers::{codex, gemini};
use crate::storage::config::GatewayConfig;

/// Raw probe result, before the plan assigns a severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub ok: bool,
    pub details: String,
}

impl ProbeOutcome {
    fn pass(details: impl Into<String>) -> Self {
        Self {
            ok: true,
            details: details.into(),
        }
    }

    fn fail(details: impl Into<String>) -> Self {
        Self {
            ok: false,
            details: details.into(),
        }
    }
}

/// Look up a CLI on the search path.
pub fn probe_binary(locator: &dyn BinaryLocator, bin: &str) -> ProbeOutcome {
    match locator.locate(bin) {
        Some(path) => ProbeOutcome::pass(path.display().to_string()),
        None => ProbeOutcome::fail(format!("not found on PATH: {bin}")),
    }
}

/// Codex `auth.json` exposes a usable token or API key.
pub fn probe_codex_auth(codex_home: Option<&Path>) -> ProbeOutcome {
    if codex::load_codex_auth(codex_home).is_usable() {
        ProbeOutcome::pass("auth ok")
    } else {
        ProbeOutcome::fail("missing ~/.codex/auth.json tokens (run `codex login`)")
    }
}

/// Gemini OAuth cache holds an access or refresh token.
pub fn probe_gemini_cache(path: &Path) -> ProbeOutcome {
    match gemini::load_gemini_creds(path) {
        Ok(creds) => ProbeOutcome {
            ok: creds.is_usable(),
            details: format!(
                "{} (access={} refresh={})",
                path.display(),
                creds.has_access_token(),
                creds.has_refresh_token()
            ),
        },
        Err(GatewayError::CredentialsMissing { .. }) => ProbeOutcome::fail(format!(
            "missing: {} (run `gemini auth login`)",
            path.display()
        )),
        Err(GatewayError::CredentialsInvalid { reason, .. }) => {
            ProbeOutcome::fail(format!("{} (invalid: {reason})", path.display()))
        }
        Err(e) => ProbeOutcome::fail(format!("{} (invalid: {e})", path.display())),
    }
}

/// Claude OAuth cache exists, survives a refresh-or-validate step, and
/// still holds an access or refresh token afterwards.
pub async fn probe_claude_cache(
    refresher: &dyn ClaudeOAuthRefresher,
    path: &Path,
) -> ProbeOutcome {
    if !path.exists() {
        return ProbeOutcome::fail(format!(
            "missing: {} (run `claude setup-token` or copy an OAuth cache to this path)",
            path.display()
        ));
    }
    match refresher.refresh(path).await {
        Ok(creds) => ProbeOutcome {
            ok: creds.is_usable(),
            details: format!(
                "{} (access={} refresh={})",
                path.display(),
                creds.has_access_token(),
                creds.has_refresh_token()
            ),
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Claude OAuth refresh failed");
            ProbeOutcome::fail(format!("{} (refresh failed: {e})", path.display()))
        }
    }
}

/// Configured workspace is an existing directory.
pub fn probe_workspace(dir: &Path) -> ProbeOutcome {
    if dir.is_dir() {
        ProbeOutcome::pass(dir.display().to_string())
    } else {
        ProbeOutcome::fail(format!("missing or not a directory: {}", dir.display()))
    }
}

// =============================================================================
// Evaluator
// =============================================================================

/// Readiness evaluator.
///
/// Holds the resolved configuration plus the two collaborators that touch
/// the outside world: binary discovery and the Claude OAuth refresh step.
pub struct Doctor {
    config: GatewayConfig,
    locator: Box<dyn BinaryLocator>,
    claude_refresher: Box<dyn ClaudeOAuthRefresher>,
}

impl std::fmt::Debug for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Doctor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Doctor {
    /// Evaluator using the process `PATH` and local cache validation.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            locator: Box::new(PathLocator),
            claude_refresher: Box::new(CachedClaudeOAuth),
        }
    }

    #[must_use]
    pub fn with_locator(mut self, locator: impl BinaryLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    #[must_use]
    pub fn with_claude_refresher(mut self, refresher: impl ClaudeOAuthRefresher + 'static) -> Self {
        self.claude_refresher = Box::new(refresher);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn probe(&self, kind: CheckKind) -> ProbeOutcome {
        match kind {
            CheckKind::Binary(bin) => probe_binary(self.locator.as_ref(), bin),
            CheckKind::CodexAuth => probe_codex_auth(self.config.codex_home.as_deref()),
            CheckKind::GeminiOAuthCache => probe_gemini_cache(&self.config.gemini_oauth_creds),
            CheckKind::ClaudeOAuthCache => {
                probe_claude_cache(
                    self.claude_refresher.as_ref(),
                    &self.config.claude_oauth_creds,
                )
                .await
            }
            // Planned only when a workspace is configured.
            CheckKind::Workspace => self
                .config
                .workspace
                .as_deref()
                .map_or_else(|| ProbeOutcome::fail("not configured"), probe_workspace),
        }
    }

    /// Run every check for the configured provider and build the report.
    pub async fn run(&self) -> DoctorReport {
        let start = Instant::now();
        let provider = self.config.provider;
        let flags = self.config.flags;

        let planned = plan::plan_checks(provider, flags, self.config.workspace.as_deref());
        let backends = plan::evaluated_backends(provider);

        let mut kinds: Vec<CheckKind> = planned.iter().map(|p| p.kind).collect();
        for backend in &backends {
            kinds.extend(plan::gating_checks(*backend, flags));
        }
        let mut seen = std::collections::HashSet::new();
        kinds.retain(|kind| seen.insert(*kind));

        tracing::debug!(%provider, probes = kinds.len(), "Running readiness probes");

        let outcomes: HashMap<CheckKind, ProbeOutcome> =
            join_all(kinds.iter().map(|&kind| async move { (kind, self.probe(kind).await) }))
                .await
                .into_iter()
                .collect();

        let checks: Vec<CheckResult> = planned
            .iter()
            .map(|p| {
                let outcome = outcomes
                    .get(&p.kind)
                    .cloned()
                    .unwrap_or_else(|| ProbeOutcome::fail("not evaluated"));
                CheckResult::new(p.kind.name(), outcome.ok, p.required, outcome.details)
            })
            .collect();

        let readiness: Vec<ProviderReadiness> = backends
            .iter()
            .map(|&backend| ProviderReadiness {
                provider: backend,
                ready: plan::gating_checks(backend, flags)
                    .iter()
                    .all(|kind| outcomes.get(kind).is_some_and(|o| o.ok)),
            })
            .collect();

        let report = DoctorReport::new(provider, flags, checks, readiness, start.elapsed());
        tracing::info!(
            %provider,
            verdict = %report.verdict,
            duration_ms = report.total_duration.as_millis(),
            "Readiness evaluation complete"
        );
        report
    }
}
