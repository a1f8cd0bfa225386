//! Provider-specific credential loaders.
//!
//! Each submodule reads one backend's local credential cache. None of them
//! write to disk.

pub mod claude;
pub mod codex;
pub mod gemini;

pub use claude::{CachedClaudeOAuth, ClaudeOAuthCredentials, ClaudeOAuthRefresher};
pub use codex::{CodexAuth, load_codex_auth};
pub use gemini::{GeminiCredentials, load_gemini_creds};
