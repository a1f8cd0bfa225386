//! Shared helpers for integration tests.
//!
//! - `log_capture`: collects tracing events emitted on the current thread

pub mod log_capture;
