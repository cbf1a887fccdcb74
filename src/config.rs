//! Bootstrap configuration.
//!
//! Everything the pipeline needs is pinned here as defaults: runtime
//! version, installer URL, package set, target script, grace period. An
//! optional `pystrap.json` next to the working directory may override any
//! field; absence of the file is not an error.

use crate::error::{PystrapError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pystrap.json";

/// Pipeline configuration with pinned defaults and optional JSON override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Runtime binary name probed on the execution path.
    pub runtime: String,

    /// Windowless variant of the runtime binary, used for detached launch.
    pub windowless_runtime: String,

    /// Pinned runtime version the installer provides.
    pub runtime_version: String,

    /// Fixed URL of the runtime installer binary.
    pub installer_url: String,

    /// Optional SHA-256 digest (lowercase hex) of the installer payload.
    ///
    /// When `None`, the download is accepted unverified and the pipeline
    /// emits a warning-level event surfacing the accepted risk.
    pub installer_sha256: Option<String>,

    /// Fixed set of packages installed via the runtime's package manager.
    pub packages: Vec<String>,

    /// Target script launched after bootstrap.
    pub script: PathBuf,

    /// Seconds to block after running the installer, tolerating
    /// asynchronous completion before re-probing.
    pub grace_period_secs: u64,

    /// Override for the runtime install root. When unset, the platform
    /// default per-user install location is used.
    pub install_root: Option<PathBuf>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            runtime: "python".to_string(),
            windowless_runtime: "pythonw".to_string(),
            runtime_version: "3.12.6".to_string(),
            installer_url: "https://www.python.org/ftp/python/3.12.6/python-3.12.6-amd64.exe"
                .to_string(),
            installer_sha256: None,
            packages: vec![
                "pystray".to_string(),
                "pillow".to_string(),
                "keyboard".to_string(),
            ],
            script: PathBuf::from("window_positioner_v3.py"),
            grace_period_secs: 10,
            install_root: None,
        }
    }
}

impl BootstrapConfig {
    /// Load configuration, applying the JSON override file when present.
    ///
    /// An explicitly supplied path must exist and parse; the implicit
    /// `pystrap.json` lookup tolerates absence.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let implicit = PathBuf::from(CONFIG_FILE_NAME);
                if !implicit.is_file() {
                    return Ok(Self::default());
                }
                implicit
            }
        };

        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| PystrapError::ConfigParseError {
            path,
            message: e.to_string(),
        })
    }

    /// File name the downloaded installer artifact is written under,
    /// derived from the last URL segment.
    pub fn installer_filename(&self) -> String {
        self.installer_url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("runtime-installer.bin")
            .to_string()
    }

    /// Directory name the runtime installs under (e.g. "Python312" for
    /// version "3.12.6").
    pub fn runtime_dir_name(&self) -> String {
        let mut parts = self.runtime_version.split('.');
        let major = parts.next().unwrap_or("");
        let minor = parts.next().unwrap_or("");
        format!("Python{}{}", major, minor)
    }

    /// The two well-known execution-path entries the installer creates:
    /// the binary directory and its `Scripts` subdirectory.
    ///
    /// A freshly written system PATH is invisible to the already-running
    /// process, so these are prepended to the process-scoped path after
    /// installation.
    pub fn install_path_entries(&self) -> Vec<PathBuf> {
        let root = self
            .install_root
            .clone()
            .unwrap_or_else(|| self.default_install_root());
        let scripts = root.join("Scripts");
        vec![root, scripts]
    }

    /// Platform default per-user install root for the pinned runtime.
    fn default_install_root(&self) -> PathBuf {
        let dir_name = self.runtime_dir_name();
        if cfg!(target_os = "windows") {
            let local = std::env::var_os("LOCALAPPDATA")
                .map(PathBuf::from)
                .unwrap_or_default();
            local.join("Programs").join("Python").join(dir_name)
        } else {
            let home = std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_default();
            home.join(".local").join(dir_name.to_lowercase())
        }
    }
}
