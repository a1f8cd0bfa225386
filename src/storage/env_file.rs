//! `.env` file parsing.
//!
//! Values from the file never override the real process environment; see
//! [`EnvSource`](super::config::EnvSource).

use std::fs;
use std::path::Path;

use crate::error::{GatewayError, Result};

/// Parsed `KEY=VALUE` pairs in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    /// Parse file contents.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let entries = content.lines().filter_map(parse_line).collect();
        Self { entries }
    }

    /// Load a `.env` file. A missing path (or a directory) yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EnvFile`] if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "No env file to load");
            return Ok(Self::default());
        }
        let bytes = fs::read(path).map_err(|source| GatewayError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = Self::parse(&String::from_utf8_lossy(&bytes));
        tracing::debug!(path = %path.display(), keys = parsed.len(), "Loaded env file");
        Ok(parsed)
    }

    /// First value recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parsed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file contributed no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(raw: &str) -> Option<(String, String)> {
    let mut line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if let Some(rest) = line.strip_prefix("export ") {
        line = rest.trim();
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    let Some(first) = value.chars().next().filter(|c| matches!(*c, '"' | '\'')) else {
        return value;
    };
    if !value.ends_with(first) {
        return value;
    }
    if value.len() == 1 {
        return "";
    }
    &value[1..value.len() - 1]
}
