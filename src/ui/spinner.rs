//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A progress spinner for long-running stages.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Create a spinner that doesn't show (for quiet/silent modes).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Update the spinner message.
    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    /// Stop the spinner, leaving a success line.
    pub fn finish_success(&self, msg: &str) {
        self.bar
            .finish_with_message(format!("{} {}", console::style("✓").green(), msg));
    }

    /// Stop the spinner, leaving a failure line.
    pub fn finish_error(&self, msg: &str) {
        self.bar
            .finish_with_message(format!("{} {}", console::style("✗").red(), msg));
    }

    /// Stop the spinner without leaving a line.
    pub fn finish_clear(&self) {
        self.bar.finish_and_clear();
    }
}
