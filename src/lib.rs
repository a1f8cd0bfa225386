//! agent-cli-to-api
//!
//! Support library for an OpenAI-compatible gateway that serves requests
//! through local agent CLIs (Codex, Gemini, Claude, Cursor Agent).
//!
//! Two pieces live here:
//!
//! - [`core::doctor`]: checks whether the configured provider can serve
//!   requests on this machine and reports why not.
//! - [`openai`]: flattens a chat completion request into the single prompt
//!   and image list the CLIs accept.

// Note: deny (not forbid) to allow #[allow(unsafe_code)] in test helpers for env var manipulation
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod openai;
pub mod providers;
pub mod render;
pub mod storage;
pub mod util;

/// Test utilities module - included in test builds or when test-utils feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{ExitCode, GatewayError, Result};
