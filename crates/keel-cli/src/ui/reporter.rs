//! Terminal rendering of build progress.

use super::{Spinner, messages};
use keel_build::report::{error_detail, failure_line, success_line};
use keel_build::{BuildError, Reporter};
use std::time::Duration;
use tracing::debug;

/// [`Reporter`] that shows a spinner while the build runs and replaces it
/// with the timing line when the build ends.
///
/// The error itself is rendered once by `main` as a miette diagnostic; this
/// reporter only prints the failure line.
#[derive(Default)]
pub struct TerminalReporter {
    spinner: Option<Spinner>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for TerminalReporter {
    fn started(&mut self, message: &str) {
        self.spinner = Some(Spinner::new(message));
    }

    fn succeeded(&mut self, elapsed: Duration) {
        let line = success_line(elapsed);
        match self.spinner.take() {
            Some(spinner) => spinner.finish(&line),
            None => messages::success(&line),
        }
    }

    fn hint(&mut self, message: &str) {
        messages::info(message);
    }

    fn failed(&mut self, elapsed: Duration, err: &BuildError) {
        debug!(error = %error_detail(err), "build failed");
        let line = failure_line(elapsed);
        match self.spinner.take() {
            Some(spinner) => spinner.fail(&line),
            None => messages::error(&line),
        }
    }
}
