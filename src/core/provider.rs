//! Provider identifiers and per-provider metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Provider Enum
// =============================================================================

/// A provider selection.
///
/// `Auto` is a meta-selection: evaluate every backend and require at least
/// one of them to be ready.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    #[default]
    Auto,
    Codex,
    Gemini,
    Claude,
    CursorAgent,
}

impl ProviderId {
    /// Every selection, including `Auto`.
    pub const ALL: &'static [Self] = &[
        Self::Auto,
        Self::Codex,
        Self::Gemini,
        Self::Claude,
        Self::CursorAgent,
    ];

    /// Concrete backends in report order.
    pub const BACKENDS: &'static [Self] =
        &[Self::Codex, Self::Gemini, Self::Claude, Self::CursorAgent];

    /// Normalize a raw selection string.
    ///
    /// Never fails: empty and unrecognized values select `Auto`.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        let value = raw.unwrap_or_default().trim().to_lowercase();
        match value.as_str() {
            "codex" => Self::Codex,
            "gemini" => Self::Gemini,
            "claude" => Self::Claude,
            "cursor-agent" | "cursor" | "cursoragent" | "cursor_agent" => Self::CursorAgent,
            _ => Self::Auto,
        }
    }

    /// Canonical identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Codex => "codex",
            Self::Gemini => "gemini",
            Self::Claude => "claude",
            Self::CursorAgent => "cursor-agent",
        }
    }

    /// Executable name looked up on PATH. `None` for `Auto`.
    #[must_use]
    pub const fn binary_name(self) -> Option<&'static str> {
        match self {
            Self::Auto => None,
            Self::Codex => Some("codex"),
            Self::Gemini => Some("gemini"),
            Self::Claude => Some("claude"),
            Self::CursorAgent => Some("cursor-agent"),
        }
    }

    /// Display name for human output.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Codex => "Codex",
            Self::Gemini => "Gemini",
            Self::Claude => "Claude",
            Self::CursorAgent => "Cursor Agent",
        }
    }

    /// Whether this is the `Auto` meta-selection.
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Installation hint for this provider's CLI.
    #[must_use]
    pub const fn install_suggestion(self) -> &'static str {
        match self {
            Self::Codex => "Install with: npm install -g @openai/codex",
            Self::Claude => "Install with: npm install -g @anthropic-ai/claude-code",
            Self::Gemini => "Install with: npm install -g @google/gemini-cli",
            Self::CursorAgent => "Install with: curl https://cursor.com/install -fsS | bash",
            Self::Auto => "Install at least one supported agent CLI",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
