//! CLI argument definitions.
//!
//! pystrap runs with zero arguments (double-clickable semantics); every
//! flag here is an optional operator override.

use clap::Parser;
use std::path::PathBuf;

/// pystrap - Bootstrap a pinned Python runtime and launch a target script.
#[derive(Debug, Parser)]
#[command(name = "pystrap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ./pystrap.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target script to launch (overrides the configured one)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Stop after dependency installation; do not launch the target
    #[arg(long)]
    pub no_launch: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
