//! Pipeline scenarios driven through scripted operations.
//!
//! Each test scripts the outcome of every external invocation and asserts
//! the state machine's ordering, fallback edges, and recorded events.

use pystrap::bootstrap::{
    Bootstrap, BootstrapEvent, BootstrapOps, InvocationForm, LaunchMode, ProbeReport, StageOutcome,
};
use pystrap::config::BootstrapConfig;
use pystrap::fetch::DownloadOutcome;
use pystrap::shell::PathConfig;
use pystrap::ui::{Output, OutputMode};
use pystrap::PystrapError;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Ops implementation with scripted outcomes and full call recording.
struct ScriptedOps {
    probe_results: VecDeque<ProbeReport>,
    download_outcome: DownloadOutcome,
    installer_outcome: StageOutcome,
    package_outcomes: VecDeque<StageOutcome>,
    detached_outcome: StageOutcome,
    attached_outcome: StageOutcome,
    remove_result: bool,

    downloads: Vec<String>,
    installer_runs: usize,
    package_calls: Vec<InvocationForm>,
    launch_calls: Vec<LaunchMode>,
    removed: Vec<PathBuf>,
    waits: Vec<Duration>,
    pauses: usize,
}

impl ScriptedOps {
    fn new() -> Self {
        Self {
            probe_results: VecDeque::new(),
            download_outcome: DownloadOutcome::Unverified,
            installer_outcome: StageOutcome::Success,
            package_outcomes: VecDeque::new(),
            detached_outcome: StageOutcome::Success,
            attached_outcome: StageOutcome::Success,
            remove_result: true,

            downloads: Vec::new(),
            installer_runs: 0,
            package_calls: Vec::new(),
            launch_calls: Vec::new(),
            removed: Vec::new(),
            waits: Vec::new(),
            pauses: 0,
        }
    }
}

impl BootstrapOps for ScriptedOps {
    fn probe_runtime(&mut self, _runtime: &str, _path: &PathConfig) -> ProbeReport {
        self.probe_results
            .pop_front()
            .unwrap_or_else(ProbeReport::absent)
    }

    fn download_installer(
        &mut self,
        url: &str,
        _dest: &Path,
        _expected_sha256: Option<&str>,
    ) -> DownloadOutcome {
        self.downloads.push(url.to_string());
        self.download_outcome.clone()
    }

    fn run_installer(&mut self, _artifact: &Path) -> StageOutcome {
        self.installer_runs += 1;
        self.installer_outcome
    }

    fn wait_grace_period(&mut self, period: Duration) {
        self.waits.push(period);
    }

    fn install_packages(
        &mut self,
        _runtime: &str,
        _packages: &[String],
        form: InvocationForm,
        _path: &PathConfig,
    ) -> StageOutcome {
        self.package_calls.push(form);
        self.package_outcomes
            .pop_front()
            .unwrap_or(StageOutcome::Success)
    }

    fn launch(
        &mut self,
        _runtime: &str,
        _windowless: &str,
        _script: &Path,
        mode: LaunchMode,
        _path: &PathConfig,
    ) -> StageOutcome {
        self.launch_calls.push(mode);
        match mode {
            LaunchMode::Detached => self.detached_outcome,
            LaunchMode::Attached => self.attached_outcome,
        }
    }

    fn remove_artifact(&mut self, artifact: &Path) -> bool {
        self.removed.push(artifact.to_path_buf());
        self.remove_result
    }

    fn pause_for_acknowledgment(&mut self) {
        self.pauses += 1;
    }
}

fn config_with_root(root: &str) -> BootstrapConfig {
    BootstrapConfig {
        install_root: Some(PathBuf::from(root)),
        ..Default::default()
    }
}

fn silent() -> Output {
    Output::new(OutputMode::Silent)
}

fn run(config: &BootstrapConfig, ops: &mut ScriptedOps) -> (pystrap::Result<()>, Vec<BootstrapEvent>) {
    let output = silent();
    let mut bootstrap = Bootstrap::new(config, ops, &output, PathConfig::from_entries(vec![]));
    let result = bootstrap.run();
    let events = bootstrap.events().to_vec();
    (result, events)
}

#[test]
fn present_runtime_never_triggers_download() {
    let config = BootstrapConfig::default();
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::present(None));

    let (result, _) = run(&config, &mut ops);

    assert!(result.is_ok());
    assert!(ops.downloads.is_empty());
    assert_eq!(ops.installer_runs, 0);
    assert_eq!(ops.launch_calls, vec![LaunchMode::Detached]);
}

#[test]
fn download_failure_is_fatal_before_install_or_launch() {
    let config = BootstrapConfig::default();
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::absent());
    ops.download_outcome = DownloadOutcome::Failed {
        message: "connection reset".into(),
    };

    let (result, _) = run(&config, &mut ops);

    assert!(matches!(
        result.unwrap_err(),
        PystrapError::DownloadFailed { .. }
    ));
    assert_eq!(ops.installer_runs, 0);
    assert!(ops.package_calls.is_empty());
    assert!(ops.launch_calls.is_empty());
    // The operator gets exactly one acknowledgment pause.
    assert_eq!(ops.pauses, 1);
}

#[test]
fn persistent_absence_after_install_is_fatal_before_packages() {
    let config = config_with_root("/opt/py");
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::absent());
    ops.probe_results.push_back(ProbeReport::absent());

    let (result, events) = run(&config, &mut ops);

    assert!(matches!(
        result.unwrap_err(),
        PystrapError::RuntimeStillAbsent { .. }
    ));
    assert_eq!(ops.installer_runs, 1);
    assert!(ops.package_calls.is_empty());
    assert!(ops.launch_calls.is_empty());
    assert_eq!(ops.pauses, 1);
    // The artifact is not cleaned up on the fatal path.
    assert!(ops.removed.is_empty());
    assert!(!events.contains(&BootstrapEvent::RuntimeInstalled));
}

#[test]
fn successful_install_waits_patches_path_and_cleans_up() {
    let config = config_with_root("/opt/py");
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::absent());
    ops.probe_results
        .push_back(ProbeReport::present(Some("3.12.6".into())));

    let output = silent();
    let mut bootstrap = Bootstrap::new(
        &config,
        &mut ops,
        &output,
        PathConfig::from_entries(vec![PathBuf::from("/usr/bin")]),
    );
    let result = bootstrap.run();

    assert!(result.is_ok());
    // Grace period observed between install and re-probe.
    let path_entries = bootstrap.path().entries().to_vec();
    assert_eq!(path_entries[0], PathBuf::from("/opt/py"));
    assert_eq!(path_entries[1], PathBuf::from("/opt/py/Scripts"));
    assert_eq!(path_entries[2], PathBuf::from("/usr/bin"));
    assert_eq!(ops.waits, vec![Duration::from_secs(10)]);
    assert_eq!(ops.removed, vec![PathBuf::from("python-3.12.6-amd64.exe")]);
    assert_eq!(ops.launch_calls, vec![LaunchMode::Detached]);
}

#[test]
fn cleanup_failure_is_tolerated_and_recorded() {
    let config = config_with_root("/opt/py");
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::absent());
    ops.probe_results.push_back(ProbeReport::present(None));
    ops.remove_result = false;

    let (result, events) = run(&config, &mut ops);

    assert!(result.is_ok());
    assert!(events
        .iter()
        .any(|e| matches!(e, BootstrapEvent::CleanupFailed { .. })));
    // Still reaches the launcher.
    assert_eq!(ops.launch_calls, vec![LaunchMode::Detached]);
}

#[test]
fn idempotent_rerun_skips_installer_both_times() {
    let config = BootstrapConfig::default();

    for _ in 0..2 {
        let mut ops = ScriptedOps::new();
        ops.probe_results.push_back(ProbeReport::present(None));
        let (result, _) = run(&config, &mut ops);
        assert!(result.is_ok());
        assert!(ops.downloads.is_empty());
        assert!(!ops.launch_calls.is_empty());
    }
}

#[test]
fn package_failure_triggers_exactly_one_alternate_form_retry() {
    let config = BootstrapConfig::default();
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::present(None));
    ops.package_outcomes.push_back(StageOutcome::Failure(Some(1)));
    ops.package_outcomes.push_back(StageOutcome::Failure(Some(1)));

    let (result, events) = run(&config, &mut ops);

    // Retry failed too, yet the pipeline proceeds to launch.
    assert!(result.is_ok());
    assert_eq!(
        ops.package_calls,
        vec![InvocationForm::PackageManager, InvocationForm::RuntimeModule]
    );
    assert_eq!(ops.launch_calls, vec![LaunchMode::Detached]);
    assert!(events.contains(&BootstrapEvent::PackageRetryUnchecked {
        outcome: StageOutcome::Failure(Some(1))
    }));
}

#[test]
fn successful_package_install_does_not_retry() {
    let config = BootstrapConfig::default();
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::present(None));

    let (result, events) = run(&config, &mut ops);

    assert!(result.is_ok());
    assert_eq!(ops.package_calls, vec![InvocationForm::PackageManager]);
    assert!(!events
        .iter()
        .any(|e| matches!(e, BootstrapEvent::PackageInstallRetried { .. })));
}

#[test]
fn attached_launch_only_after_detached_failure() {
    let config = BootstrapConfig::default();
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::present(None));
    ops.detached_outcome = StageOutcome::Failure(Some(1));

    let (result, events) = run(&config, &mut ops);

    assert!(result.is_ok());
    assert_eq!(
        ops.launch_calls,
        vec![LaunchMode::Detached, LaunchMode::Attached]
    );
    assert!(events.contains(&BootstrapEvent::Launched { attached: true }));
}

#[test]
fn double_launch_failure_is_still_a_successful_run() {
    let config = BootstrapConfig::default();
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::present(None));
    ops.detached_outcome = StageOutcome::Failure(Some(1));
    ops.attached_outcome = StageOutcome::Failure(Some(1));

    let (result, events) = run(&config, &mut ops);

    // Exit 0 on reaching the launcher, regardless of its outcome.
    assert!(result.is_ok());
    assert!(events.contains(&BootstrapEvent::LaunchAbandoned));
}

#[test]
fn unverified_download_surfaces_a_degradation_event() {
    let config = config_with_root("/opt/py");
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::absent());
    ops.probe_results.push_back(ProbeReport::present(None));

    let (result, events) = run(&config, &mut ops);

    assert!(result.is_ok());
    assert!(events.contains(&BootstrapEvent::DownloadUnverified));
}

#[test]
fn verified_download_records_verification() {
    let config = config_with_root("/opt/py");
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::absent());
    ops.probe_results.push_back(ProbeReport::present(None));
    ops.download_outcome = DownloadOutcome::Verified;

    let (_, events) = run(&config, &mut ops);

    assert!(events.contains(&BootstrapEvent::DownloadVerified));
    assert!(!events.contains(&BootstrapEvent::DownloadUnverified));
}

#[test]
fn installer_nonzero_exit_is_advisory_when_reprobe_succeeds() {
    let config = config_with_root("/opt/py");
    let mut ops = ScriptedOps::new();
    ops.probe_results.push_back(ProbeReport::absent());
    ops.probe_results.push_back(ProbeReport::present(None));
    ops.installer_outcome = StageOutcome::Failure(Some(2));

    let (result, events) = run(&config, &mut ops);

    assert!(result.is_ok());
    assert!(events.contains(&BootstrapEvent::InstallerExitedNonZero { code: Some(2) }));
    assert!(events.contains(&BootstrapEvent::RuntimeInstalled));
}
