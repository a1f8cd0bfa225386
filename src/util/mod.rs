//! Utility functions.

pub mod env;

pub use env::{parse_bool, should_use_color};
