//! Spinner for the in-flight build.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner on stderr.
///
/// indicatif draws nothing when stderr isn't a terminal; in that case every
/// message is printed as a plain line instead, so piped output and CI logs
/// still show progress.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create and start a new spinner.
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒", "●"]);
        pb.set_style(style);
        pb.set_message(message.to_string());

        if pb.is_hidden() {
            eprintln!("{message}");
        } else {
            pb.enable_steady_tick(Duration::from_millis(100));
        }

        Self { pb }
    }

    /// Finish with a green checkmark.
    pub fn finish(&self, message: &str) {
        self.done(format!("{} {}", style("✓").green(), message));
    }

    /// Finish with a red cross.
    pub fn fail(&self, message: &str) {
        self.done(format!("{} {}", style("✗").red(), style(message).red()));
    }

    fn done(&self, line: String) {
        if self.pb.is_hidden() {
            self.pb.finish_and_clear();
            eprintln!("{line}");
        } else {
            self.pb.finish_with_message(line);
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
