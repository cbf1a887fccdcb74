//! The dependency-bootstrap state machine.
//!
//! Four ordered stages with fallback edges: probe the runtime, install it
//! if absent, install the package set, launch the target script. Control
//! flows strictly forward; the only loops are the single named retries
//! (alternate-form package install, attached-mode launch).
//!
//! Fatal conditions (download failure, runtime still absent after
//! install) halt the run with an operator-visible pause. Everything else
//! is best-effort: the pipeline prioritizes "something runs" over
//! "installation is verified correct", and records every swallowed
//! failure as a [`BootstrapEvent`].

pub mod events;
pub mod ops;
pub mod status;

pub use events::BootstrapEvent;
pub use ops::{BootstrapOps, SystemOps};
pub use status::{InvocationForm, LaunchMode, ProbeReport, RuntimeStatus, StageOutcome};

use crate::config::BootstrapConfig;
use crate::error::{PystrapError, Result};
use crate::fetch::DownloadOutcome;
use crate::shell::PathConfig;
use crate::ui::Output;
use std::path::PathBuf;
use std::time::Duration;

/// Drives one bootstrap run over a set of external operations.
pub struct Bootstrap<'a> {
    config: &'a BootstrapConfig,
    ops: &'a mut dyn BootstrapOps,
    output: &'a Output,
    path: PathConfig,
    events: Vec<BootstrapEvent>,
    skip_launch: bool,
}

impl<'a> Bootstrap<'a> {
    /// Create a driver over the given operations and execution path.
    pub fn new(
        config: &'a BootstrapConfig,
        ops: &'a mut dyn BootstrapOps,
        output: &'a Output,
        path: PathConfig,
    ) -> Self {
        Self {
            config,
            ops,
            output,
            path,
            events: Vec::new(),
            skip_launch: false,
        }
    }

    /// Stop after dependency installation instead of launching.
    pub fn skip_launch(mut self, skip: bool) -> Self {
        self.skip_launch = skip;
        self
    }

    /// Events recorded so far, in order.
    pub fn events(&self) -> &[BootstrapEvent] {
        &self.events
    }

    /// The execution path as patched during this run.
    pub fn path(&self) -> &PathConfig {
        &self.path
    }

    /// Run the pipeline to completion.
    ///
    /// Returns `Ok` once the launcher stage is reached (exit 0), or the
    /// fatal error that halted the run (exit 1).
    pub fn run(&mut self) -> Result<()> {
        let report = self.ops.probe_runtime(&self.config.runtime, &self.path);
        if report.status.is_present() {
            self.output.success(&match &report.version {
                Some(v) => format!("{} {} found", self.config.runtime, v),
                None => format!("{} found", self.config.runtime),
            });
            self.record(BootstrapEvent::RuntimeDetected {
                version: report.version,
            });
        } else {
            self.record(BootstrapEvent::RuntimeMissing);
            self.output
                .message(&format!("{} not found, installing...", self.config.runtime));
            self.install_runtime()?;
        }

        self.install_packages();

        if !self.skip_launch {
            self.launch();
        }
        Ok(())
    }

    /// Download and run the runtime installer, then re-probe.
    ///
    /// Only entered when the initial probe reported Absent. Both failure
    /// edges here are fatal: a failed transfer, and a runtime that is
    /// still unreachable after the install attempt.
    fn install_runtime(&mut self) -> Result<()> {
        let url = self.config.installer_url.clone();
        let artifact = PathBuf::from(self.config.installer_filename());

        self.record(BootstrapEvent::DownloadStarted { url: url.clone() });
        let spinner = self
            .output
            .spinner(&format!("Downloading {} installer", self.config.runtime));
        let downloaded = self.ops.download_installer(
            &url,
            &artifact,
            self.config.installer_sha256.as_deref(),
        );

        match downloaded {
            DownloadOutcome::Failed { message } => {
                spinner.finish_error("Download failed");
                self.output
                    .error(&format!("Failed to download installer: {}", message));
                self.ops.pause_for_acknowledgment();
                return Err(PystrapError::DownloadFailed { url, message });
            }
            DownloadOutcome::Verified => {
                spinner.finish_success("Installer downloaded and verified");
                self.record(BootstrapEvent::DownloadVerified);
            }
            DownloadOutcome::Unverified => {
                spinner.finish_success("Installer downloaded");
                self.record(BootstrapEvent::DownloadUnverified);
            }
        }

        // The installer's own exit status is advisory; the re-probe below
        // is what decides whether the install took.
        if let StageOutcome::Failure(code) = self.ops.run_installer(&artifact) {
            self.record(BootstrapEvent::InstallerExitedNonZero { code });
        }

        self.output.message("Waiting for installer to register...");
        self.ops
            .wait_grace_period(Duration::from_secs(self.config.grace_period_secs));

        // The installer writes the system PATH, which this process never
        // sees; patch the process-scoped path explicitly.
        let dirs = self.config.install_path_entries();
        self.path.prepend(&dirs);
        self.record(BootstrapEvent::PathPatched { dirs });

        let report = self.ops.probe_runtime(&self.config.runtime, &self.path);
        if !report.status.is_present() {
            self.output.error(&format!(
                "{} installation failed: runtime still not reachable",
                self.config.runtime
            ));
            self.ops.pause_for_acknowledgment();
            return Err(PystrapError::RuntimeStillAbsent {
                runtime: self.config.runtime.clone(),
            });
        }
        self.record(BootstrapEvent::RuntimeInstalled);
        self.output
            .success(&format!("{} installed", self.config.runtime));

        if !self.ops.remove_artifact(&artifact) {
            self.record(BootstrapEvent::CleanupFailed { artifact });
        }
        Ok(())
    }

    /// Install the package set, retrying once through the runtime's
    /// module entry point on failure.
    ///
    /// The retry guards against a path-resolution mismatch between the
    /// package manager's direct entry point and the runtime that was just
    /// installed. Its outcome is recorded but never gates the pipeline:
    /// dependency installation is best-effort by policy.
    fn install_packages(&mut self) {
        let first = self.ops.install_packages(
            &self.config.runtime,
            &self.config.packages,
            InvocationForm::PackageManager,
            &self.path,
        );

        if let StageOutcome::Failure(code) = first {
            self.record(BootstrapEvent::PackageInstallRetried { code });
            self.output
                .warning("Package install failed, retrying via runtime module entry point");
            let retry = self.ops.install_packages(
                &self.config.runtime,
                &self.config.packages,
                InvocationForm::RuntimeModule,
                &self.path,
            );
            self.record(BootstrapEvent::PackageRetryUnchecked { outcome: retry });
        }

        self.output.success("Dependencies installed");
    }

    /// Hand off to the target script: windowless first, attached fallback.
    ///
    /// Responsibility ends at process creation; neither child is
    /// supervised. A double failure is recorded and the run still counts
    /// as having reached the launcher.
    fn launch(&mut self) {
        let detached = self.ops.launch(
            &self.config.runtime,
            &self.config.windowless_runtime,
            &self.config.script,
            LaunchMode::Detached,
            &self.path,
        );

        match detached {
            StageOutcome::Success => {
                self.record(BootstrapEvent::Launched { attached: false });
                self.output
                    .success(&format!("{} launched", self.config.script.display()));
            }
            StageOutcome::Failure(code) => {
                self.record(BootstrapEvent::DetachedLaunchFailed { code });
                let attached = self.ops.launch(
                    &self.config.runtime,
                    &self.config.windowless_runtime,
                    &self.config.script,
                    LaunchMode::Attached,
                    &self.path,
                );
                match attached {
                    StageOutcome::Success => {
                        self.record(BootstrapEvent::Launched { attached: true });
                        self.output.success(&format!(
                            "{} launched (console mode)",
                            self.config.script.display()
                        ));
                    }
                    StageOutcome::Failure(_) => {
                        self.record(BootstrapEvent::LaunchAbandoned);
                        self.output
                            .warning(&format!("Could not launch {}", self.config.script.display()));
                    }
                }
            }
        }
    }

    fn record(&mut self, event: BootstrapEvent) {
        if event.is_degradation() {
            tracing::warn!(?event, "bootstrap degradation");
        } else {
            tracing::debug!(?event, "bootstrap event");
        }
        self.events.push(event);
    }
}
