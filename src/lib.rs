//! pystrap - Bootstrap a pinned Python runtime and launch a target script.
//!
//! pystrap is a best-effort bootstrap installer: it ensures the required
//! runtime is reachable (installing it when absent), installs a fixed set
//! of packages, and hands off to a tray-resident target script in
//! windowless mode with a console-visible fallback.
//!
//! # Modules
//!
//! - [`bootstrap`] - The state machine driving the four pipeline stages
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Pinned defaults and the optional JSON override
//! - [`error`] - Error types and result alias
//! - [`fetch`] - Installer download and SHA-256 verification
//! - [`shell`] - External command invocation and execution-path handling
//! - [`ui`] - Status output and spinners
//!
//! # Example
//!
//! ```no_run
//! use pystrap::bootstrap::{Bootstrap, SystemOps};
//! use pystrap::config::BootstrapConfig;
//! use pystrap::shell::PathConfig;
//! use pystrap::ui::{Output, OutputMode};
//!
//! let config = BootstrapConfig::default();
//! let mut ops = SystemOps::new();
//! let output = Output::new(OutputMode::Normal);
//! let mut bootstrap = Bootstrap::new(&config, &mut ops, &output, PathConfig::from_env());
//! if bootstrap.run().is_err() {
//!     std::process::exit(1);
//! }
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod shell;
pub mod ui;

pub use error::{PystrapError, Result};
