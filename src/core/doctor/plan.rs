//! Which checks run for a provider selection, and which of them are required.
//!
//! The table maps `ProviderId × FeatureFlags` to an ordered list of checks,
//! each tagged with whether it gates that backend's readiness in the active
//! mode. Gating checks are required only when the selection names that
//! backend directly; under `auto` every check is advisory.

use std::path::Path;

use crate::core::provider::ProviderId;
use crate::storage::config::FeatureFlags;

/// A readiness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// The named CLI is on PATH.
    Binary(&'static str),
    /// `auth.json` exposes an access token or API key.
    CodexAuth,
    /// Gemini OAuth cache exposes an access or refresh token.
    GeminiOAuthCache,
    /// Claude OAuth cache can be refreshed or validated.
    ClaudeOAuthCache,
    /// The configured workspace is a directory.
    Workspace,
}

impl CheckKind {
    /// Report label.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Binary(bin) => format!("{bin} binary"),
            Self::CodexAuth => "Codex auth".to_string(),
            Self::GeminiOAuthCache => "Gemini OAuth cache".to_string(),
            Self::ClaudeOAuthCache => "Claude OAuth cache".to_string(),
            Self::Workspace => "CODEX_WORKSPACE".to_string(),
        }
    }
}

/// A check scheduled for an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedCheck {
    pub kind: CheckKind,
    pub required: bool,
}

/// Checks for one backend with their gating flag, in report order.
#[must_use]
pub fn backend_checks(provider: ProviderId, flags: FeatureFlags) -> Vec<(CheckKind, bool)> {
    match provider {
        ProviderId::Codex => vec![
            (CheckKind::Binary("codex"), true),
            (CheckKind::CodexAuth, true),
        ],
        ProviderId::Gemini => vec![
            (CheckKind::Binary("gemini"), true),
            (CheckKind::GeminiOAuthCache, flags.gemini_use_cloudcode),
        ],
        ProviderId::Claude if flags.claude_use_oauth => vec![
            (CheckKind::ClaudeOAuthCache, true),
            (CheckKind::Binary("claude"), false),
        ],
        ProviderId::Claude => vec![
            (CheckKind::Binary("claude"), true),
            (CheckKind::ClaudeOAuthCache, false),
        ],
        ProviderId::CursorAgent => vec![(CheckKind::Binary("cursor-agent"), true)],
        ProviderId::Auto => Vec::new(),
    }
}

/// Checks that decide whether `provider` is ready.
#[must_use]
pub fn gating_checks(provider: ProviderId, flags: FeatureFlags) -> Vec<CheckKind> {
    backend_checks(provider, flags)
        .into_iter()
        .filter_map(|(kind, gating)| gating.then_some(kind))
        .collect()
}

/// Check order under `auto`, independent of feature flags.
const AUTO_ORDER: [CheckKind; 7] = [
    CheckKind::Binary("codex"),
    CheckKind::CodexAuth,
    CheckKind::Binary("gemini"),
    CheckKind::GeminiOAuthCache,
    CheckKind::Binary("claude"),
    CheckKind::ClaudeOAuthCache,
    CheckKind::Binary("cursor-agent"),
];

/// Backends evaluated for a selection.
#[must_use]
pub fn evaluated_backends(provider: ProviderId) -> Vec<ProviderId> {
    if provider.is_auto() {
        ProviderId::BACKENDS.to_vec()
    } else {
        vec![provider]
    }
}

/// Full, ordered plan for a selection.
///
/// A configured workspace adds a required directory check at the end.
#[must_use]
pub fn plan_checks(
    provider: ProviderId,
    flags: FeatureFlags,
    workspace: Option<&Path>,
) -> Vec<PlannedCheck> {
    let mut plan: Vec<PlannedCheck> = if provider.is_auto() {
        AUTO_ORDER
            .iter()
            .map(|&kind| PlannedCheck {
                kind,
                required: false,
            })
            .collect()
    } else {
        backend_checks(provider, flags)
            .into_iter()
            .map(|(kind, required)| PlannedCheck { kind, required })
            .collect()
    };

    if workspace.is_some() {
        plan.push(PlannedCheck {
            kind: CheckKind::Workspace,
            required: true,
        });
    }

    plan
}
