//! Binary discovery on the execution search path.

use std::ffi::OsString;
use std::path::PathBuf;

/// Resolves a program name to an absolute path.
pub trait BinaryLocator: Send + Sync {
    /// Absolute path of `program`, if it can be found. No side effects.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Looks programs up on the process `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLocator;

impl BinaryLocator for PathLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

/// Looks programs up on an explicit search path instead of the process `PATH`.
#[derive(Debug, Clone)]
pub struct SearchPathLocator {
    search_path: OsString,
    cwd: PathBuf,
}

impl SearchPathLocator {
    /// Create a locator over a `PATH`-style list of directories.
    #[must_use]
    pub fn new(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: search_path.into(),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl BinaryLocator for SearchPathLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which_in(program, Some(&self.search_path), &self.cwd).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_locator_misses_unknown_program() {
        assert!(
            PathLocator
                .locate("agent-cli-to-api-definitely-not-installed")
                .is_none()
        );
    }

    #[test]
    fn search_path_locator_ignores_empty_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let locator = SearchPathLocator::new(dir.path().as_os_str());
        assert!(locator.locate("codex").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn search_path_locator_finds_executables() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("codex");
        std::fs::write(&bin, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let locator = SearchPathLocator::new(dir.path().as_os_str());
        let found = locator.locate("codex").unwrap();
        assert!(found.ends_with("codex"));
        assert!(found.is_absolute());
    }
}
