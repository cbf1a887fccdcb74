//! Status and outcome types for the bootstrap pipeline.

use regex::Regex;

/// Whether the required runtime is reachable on the execution path.
///
/// Derived fresh by probing on every run; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeStatus {
    /// Version query failed or binary not found.
    Absent,
    /// Version query exited zero.
    Present,
}

impl RuntimeStatus {
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present)
    }
}

/// Result of one runtime probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub status: RuntimeStatus,
    /// Version reported by the runtime, when it could be parsed.
    pub version: Option<String>,
}

impl ProbeReport {
    pub fn absent() -> Self {
        Self {
            status: RuntimeStatus::Absent,
            version: None,
        }
    }

    pub fn present(version: Option<String>) -> Self {
        Self {
            status: RuntimeStatus::Present,
            version,
        }
    }
}

/// Outcome of one external operation, gating the next stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Success,
    /// Non-zero exit, or `None` when the process could not be started or
    /// was killed by a signal.
    Failure(Option<i32>),
}

impl StageOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Map an exit code to an outcome.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Success,
            other => Self::Failure(other),
        }
    }
}

/// How the package install is invoked.
///
/// The direct package-manager entry point and the runtime's module
/// entry point can resolve to different installations when PATH is
/// stale; the retry switches forms to guard against that mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationForm {
    /// `pip install ...`
    PackageManager,
    /// `python -m pip install ...`
    RuntimeModule,
}

/// Process launch mode for the target script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Windowless, suitable for a tray-resident application.
    Detached,
    /// Console-visible, used as the diagnostic fallback.
    Attached,
}

/// Extract a dotted version number from a runtime's version-query output
/// (e.g. "Python 3.12.6" -> "3.12.6").
pub fn extract_version(output: &str) -> Option<String> {
    // Pattern is static and valid; a build failure here is a programmer error.
    let re = Regex::new(r"(\d+\.\d+(?:\.\d+)?)").ok()?;
    re.captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
