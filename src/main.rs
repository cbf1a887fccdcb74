//! pystrap CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use pystrap::bootstrap::{Bootstrap, SystemOps};
use pystrap::cli::Cli;
use pystrap::config::BootstrapConfig;
use pystrap::shell::PathConfig;
use pystrap::ui::{Output, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("pystrap=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pystrap=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("pystrap starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut config = match BootstrapConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };
    if let Some(script) = cli.script {
        config.script = script;
    }

    let output = Output::new(output_mode);
    let mut ops = SystemOps::new();
    let mut bootstrap = Bootstrap::new(&config, &mut ops, &output, PathConfig::from_env())
        .skip_launch(cli.no_launch);

    match bootstrap.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
