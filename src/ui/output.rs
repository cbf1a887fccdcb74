//! Output mode and status writer.

use console::style;
use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including per-stage detail.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Suppress status lines and spinners; errors still shown.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet | Self::Silent)
    }
}

/// Status writer that respects the output mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Write a plain status line.
    pub fn message(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    /// Write a success line.
    pub fn success(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    /// Write a warning line.
    pub fn warning(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Write an error line. Shown in every mode.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", style("✗").red(), msg);
    }

    /// Start a spinner for a long-running stage; hidden when the mode
    /// suppresses spinners.
    pub fn spinner(&self, msg: &str) -> super::spinner::ProgressSpinner {
        if self.mode.shows_spinners() {
            super::spinner::ProgressSpinner::new(msg)
        } else {
            super::spinner::ProgressSpinner::hidden()
        }
    }
}
