//! External operations behind the bootstrap pipeline.
//!
//! [`BootstrapOps`] is the seam between the state machine and the outside
//! world: probing, downloading, running installers, package installs, and
//! process hand-off. [`SystemOps`] is the production implementation;
//! tests drive the pipeline with scripted implementations instead.

use crate::bootstrap::status::{
    extract_version, InvocationForm, LaunchMode, ProbeReport, StageOutcome,
};
use crate::fetch::{DownloadOutcome, HttpFetcher};
use crate::shell::{self, CommandOptions, PathConfig};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Flags passed to the unattended runtime installer: no UI, current-user
/// scope, add to PATH, skip the test suite.
const INSTALLER_FLAGS: &[&str] = &[
    "/quiet",
    "InstallAllUsers=0",
    "PrependPath=1",
    "Include_test=0",
];

/// Quiet-mode arguments for the package manager.
const PIP_INSTALL_ARGS: &[&str] = &["install", "--quiet"];

/// External side effects the bootstrap pipeline performs.
pub trait BootstrapOps {
    /// Invoke the runtime's version query, discarding output beyond
    /// version extraction. No side effects.
    fn probe_runtime(&mut self, runtime: &str, path: &PathConfig) -> ProbeReport;

    /// Blocking fetch of the installer artifact to `dest`, verifying
    /// against `expected_sha256` when pinned.
    fn download_installer(
        &mut self,
        url: &str,
        dest: &Path,
        expected_sha256: Option<&str>,
    ) -> DownloadOutcome;

    /// Execute the downloaded installer unattended and wait for it.
    fn run_installer(&mut self, artifact: &Path) -> StageOutcome;

    /// Block for the post-install grace period.
    fn wait_grace_period(&mut self, period: Duration);

    /// Install the package set in quiet mode through the given form.
    fn install_packages(
        &mut self,
        runtime: &str,
        packages: &[String],
        form: InvocationForm,
        path: &PathConfig,
    ) -> StageOutcome;

    /// Start the target script; success means process creation only.
    fn launch(
        &mut self,
        runtime: &str,
        windowless_runtime: &str,
        script: &Path,
        mode: LaunchMode,
        path: &PathConfig,
    ) -> StageOutcome;

    /// Best-effort deletion of the downloaded artifact.
    fn remove_artifact(&mut self, artifact: &Path) -> bool;

    /// Block until the operator acknowledges a fatal condition.
    fn pause_for_acknowledgment(&mut self);
}

/// Map a completed command to a stage outcome.
fn outcome(result: &shell::CommandResult) -> StageOutcome {
    if result.success {
        StageOutcome::Success
    } else {
        StageOutcome::Failure(result.exit_code)
    }
}

/// Production implementation backed by real processes, the filesystem,
/// and the network.
pub struct SystemOps {
    fetcher: HttpFetcher,
}

impl SystemOps {
    pub fn new() -> Self {
        Self {
            fetcher: HttpFetcher::new(),
        }
    }

    /// Use a fetcher with a non-default timeout.
    pub fn with_fetcher(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }
}

impl Default for SystemOps {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapOps for SystemOps {
    fn probe_runtime(&mut self, runtime: &str, path: &PathConfig) -> ProbeReport {
        let options = CommandOptions::captured(path.joined());
        let result = shell::execute(runtime, &["--version"], &options);
        if result.success {
            // Some runtimes print the version banner on stderr.
            let banner = if result.stdout.trim().is_empty() {
                &result.stderr
            } else {
                &result.stdout
            };
            let version = extract_version(banner);
            tracing::debug!(runtime, ?version, "runtime probe succeeded");
            ProbeReport::present(version)
        } else {
            tracing::debug!(runtime, code = ?result.exit_code, "runtime probe failed");
            ProbeReport::absent()
        }
    }

    fn download_installer(
        &mut self,
        url: &str,
        dest: &Path,
        expected_sha256: Option<&str>,
    ) -> DownloadOutcome {
        tracing::info!(url, dest = %dest.display(), "downloading runtime installer");
        self.fetcher.download_to(url, dest, expected_sha256)
    }

    fn run_installer(&mut self, artifact: &Path) -> StageOutcome {
        let program = artifact.to_string_lossy();
        tracing::info!(installer = %program, "running unattended runtime installer");
        let options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };
        outcome(&shell::execute(&program, INSTALLER_FLAGS, &options))
    }

    fn wait_grace_period(&mut self, period: Duration) {
        // The installer process can return before the runtime is fully
        // registered; this is a heuristic grace period, not a readiness check.
        std::thread::sleep(period);
    }

    fn install_packages(
        &mut self,
        runtime: &str,
        packages: &[String],
        form: InvocationForm,
        path: &PathConfig,
    ) -> StageOutcome {
        let options = CommandOptions::captured(path.joined());
        let pkg_refs: Vec<&str> = packages.iter().map(String::as_str).collect();

        let (program, mut args): (&str, Vec<&str>) = match form {
            InvocationForm::PackageManager => ("pip", PIP_INSTALL_ARGS.to_vec()),
            InvocationForm::RuntimeModule => {
                let mut a = vec!["-m", "pip"];
                a.extend_from_slice(PIP_INSTALL_ARGS);
                (runtime, a)
            }
        };
        args.extend_from_slice(&pkg_refs);

        tracing::info!(?form, packages = ?packages, "installing packages");
        let result = shell::execute(program, &args, &options);
        if !result.success && !result.stderr.trim().is_empty() {
            tracing::debug!(stderr = %result.stderr.trim(), "package install output");
        }
        outcome(&result)
    }

    fn launch(
        &mut self,
        runtime: &str,
        windowless_runtime: &str,
        script: &Path,
        mode: LaunchMode,
        path: &PathConfig,
    ) -> StageOutcome {
        let options = CommandOptions {
            path: Some(path.joined()),
            ..Default::default()
        };
        let script_arg = script.to_string_lossy();

        let spawned = match mode {
            LaunchMode::Detached => {
                shell::spawn_detached(windowless_runtime, &[&script_arg], &options)
            }
            LaunchMode::Attached => shell::spawn_attached(runtime, &[&script_arg], &options),
        };

        match spawned {
            Ok(pid) => {
                tracing::info!(?mode, pid, script = %script.display(), "target launched");
                StageOutcome::Success
            }
            Err(e) => {
                tracing::debug!(?mode, error = %e, "launch failed");
                StageOutcome::Failure(None)
            }
        }
    }

    fn remove_artifact(&mut self, artifact: &Path) -> bool {
        match std::fs::remove_file(artifact) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(artifact = %artifact.display(), error = %e, "cleanup failed");
                false
            }
        }
    }

    fn pause_for_acknowledgment(&mut self) {
        // Only block when a human is actually attached to the terminal;
        // CI and piped runs exit immediately.
        if !console::user_attended() {
            return;
        }
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "Press Enter to exit...");
        let _ = stdout.flush();
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
    }
}
