//! Bootstrap event stream.
//!
//! The pipeline deliberately swallows some failures (package install
//! retry outcome, windowless launch). Each such decision is recorded as a
//! [`BootstrapEvent`] so degradation is observable to callers and tests
//! instead of silent; warning-grade events are also logged via `tracing`.

use crate::bootstrap::status::StageOutcome;
use std::path::PathBuf;

/// One observable step or degradation in a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapEvent {
    /// The runtime was already reachable; installer stages skipped.
    RuntimeDetected { version: Option<String> },

    /// The runtime was not reachable; install path entered.
    RuntimeMissing,

    /// Installer download beginning.
    DownloadStarted { url: String },

    /// Installer artifact accepted without integrity verification.
    ///
    /// No digest is pinned in config, matching the original artifact's
    /// accepted risk; surfaced here rather than silently preserved.
    DownloadUnverified,

    /// Installer artifact verified against the pinned SHA-256 digest.
    DownloadVerified,

    /// The unattended installer invocation returned non-zero. Not fatal
    /// by itself; the re-probe decides.
    InstallerExitedNonZero { code: Option<i32> },

    /// Install directories prepended to the process-scoped path.
    PathPatched { dirs: Vec<PathBuf> },

    /// Post-install probe found the runtime.
    RuntimeInstalled,

    /// Best-effort deletion of the downloaded artifact failed.
    CleanupFailed { artifact: PathBuf },

    /// First package-manager invocation failed; the single alternate-form
    /// retry is being attempted.
    PackageInstallRetried { code: Option<i32> },

    /// The retry ran and its outcome is recorded but not gated on; the
    /// pipeline proceeds regardless.
    PackageRetryUnchecked { outcome: StageOutcome },

    /// Windowless launch failed; falling back to attached mode.
    DetachedLaunchFailed { code: Option<i32> },

    /// The target script was handed off.
    Launched { attached: bool },

    /// Both launch modes failed; nothing further is attempted.
    LaunchAbandoned,
}

impl BootstrapEvent {
    /// Whether this event represents accepted degradation (logged at WARN).
    pub fn is_degradation(&self) -> bool {
        matches!(
            self,
            Self::DownloadUnverified
                | Self::InstallerExitedNonZero { .. }
                | Self::CleanupFailed { .. }
                | Self::PackageInstallRetried { .. }
                | Self::PackageRetryUnchecked {
                    outcome: StageOutcome::Failure(_)
                }
                | Self::DetachedLaunchFailed { .. }
                | Self::LaunchAbandoned
        )
    }
}
