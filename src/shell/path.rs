//! Process-scoped execution path.
//!
//! A runtime installer writes its PATH changes to the system environment,
//! but the already-running bootstrap process never sees them. [`PathConfig`]
//! models the execution path as an explicit value: the pipeline prepends
//! the freshly installed directories to it and hands the joined result to
//! every child process, instead of mutating ambient `std::env` state.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Explicit, process-scoped view of the execution path.
#[derive(Debug, Clone)]
pub struct PathConfig {
    entries: Vec<PathBuf>,
}

impl PathConfig {
    /// Capture the current PATH environment variable.
    pub fn from_env() -> Self {
        let entries = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default();
        Self { entries }
    }

    /// Build a path from explicit entries (used in tests).
    pub fn from_entries(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// The directories in lookup order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Prepend directories, keeping their relative order and skipping
    /// any that are already present.
    pub fn prepend(&mut self, dirs: &[PathBuf]) {
        for dir in dirs.iter().rev() {
            if !self.entries.contains(dir) {
                self.entries.insert(0, dir.clone());
            }
        }
    }

    /// Whether a directory is already on the path.
    pub fn contains(&self, dir: &Path) -> bool {
        self.entries.iter().any(|e| e == dir)
    }

    /// Join the entries into a PATH-style value for a child environment.
    pub fn joined(&self) -> OsString {
        std::env::join_paths(&self.entries).unwrap_or_default()
    }

    /// Resolve a tool's binary by iterating over the entries.
    ///
    /// Returns the first match that exists and is executable. Does NOT
    /// shell out to `which` — its behavior varies across systems and it
    /// is sometimes a builtin with inconsistent error handling.
    pub fn resolve(&self, tool: &str) -> Option<PathBuf> {
        let names = candidate_names(tool);
        for dir in &self.entries {
            for name in &names {
                let candidate = dir.join(name);
                if candidate.is_file() && is_executable(&candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

/// Binary names to try for a tool, accounting for Windows extensions.
fn candidate_names(tool: &str) -> Vec<String> {
    if cfg!(target_os = "windows") && !tool.contains('.') {
        vec![format!("{tool}.exe"), tool.to_string()]
    } else {
        vec![tool.to_string()]
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not
/// permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}
