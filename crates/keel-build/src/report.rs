//! Build timing and status reporting.

use crate::error::BuildError;
use std::time::Duration;
use tracing::{error, info};

/// Companion command named in the success hint.
pub const START_COMMAND: &str = "keel start";

/// Progress message shown while a build is in flight.
pub const PROGRESS_MESSAGE: &str = "Creating optimized production build...";

/// Elapsed time in milliseconds with two decimals, e.g. `"12.34"`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64() * 1000.0)
}

pub fn success_line(elapsed: Duration) -> String {
    format!("Build completed in {}ms!", format_elapsed(elapsed))
}

pub fn failure_line(elapsed: Duration) -> String {
    format!("Build failed after {}ms!", format_elapsed(elapsed))
}

pub fn start_hint(command: &str) -> String {
    format!("Run {command} to start your application.")
}

/// An error and all of its sources, joined with `": "`.
pub fn error_detail(err: &(dyn std::error::Error + 'static)) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

/// Observer for a build run.
///
/// A run calls `started` once, then either `succeeded` followed by `hint`,
/// or `failed`. Implementations must not fail.
pub trait Reporter: Send {
    fn started(&mut self, message: &str);

    fn succeeded(&mut self, elapsed: Duration);

    fn hint(&mut self, message: &str);

    fn failed(&mut self, elapsed: Duration, error: &BuildError);
}

/// Reporter that forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn started(&mut self, message: &str) {
        info!("{message}");
    }

    fn succeeded(&mut self, elapsed: Duration) {
        info!(elapsed_ms = %format_elapsed(elapsed), "{}", success_line(elapsed));
    }

    fn hint(&mut self, message: &str) {
        info!("{message}");
    }

    fn failed(&mut self, elapsed: Duration, err: &BuildError) {
        error!(
            elapsed_ms = %format_elapsed(elapsed),
            error = %error_detail(err),
            "{}",
            failure_line(elapsed)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_format_elapsed_two_decimals() {
        assert_eq!(format_elapsed(Duration::from_micros(12_500)), "12.50");
        assert_eq!(format_elapsed(Duration::from_millis(1500)), "1500.00");
        assert_eq!(format_elapsed(Duration::ZERO), "0.00");
    }

    #[test]
    fn test_status_lines() {
        let elapsed = Duration::from_millis(42);
        assert_eq!(success_line(elapsed), "Build completed in 42.00ms!");
        assert_eq!(failure_line(elapsed), "Build failed after 42.00ms!");
        assert_eq!(
            start_hint(START_COMMAND),
            "Run keel start to start your application."
        );
    }

    #[test]
    fn test_error_detail_includes_sources() {
        let err = BuildError::Inject {
            path: PathBuf::from("dist/index.js"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            error_detail(&err),
            "Failed to inject runtime shim into dist/index.js: No such file or directory"
        );
    }

    #[test]
    fn test_log_reporter_never_panics() {
        let mut reporter = LogReporter;
        reporter.started(PROGRESS_MESSAGE);
        reporter.succeeded(Duration::from_millis(3));
        reporter.hint(&start_hint(START_COMMAND));
        reporter.failed(
            Duration::from_millis(3),
            &BuildError::UnsafeOutputDir(PathBuf::from("/")),
        );
    }
}
