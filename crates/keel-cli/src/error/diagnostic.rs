//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;

/// Convert CliError to miette Report
///
/// Errors from `keel-build` keep their codes and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => Report::new(e),
        CliError::Build(e) => Report::new(e),
        CliError::Engine(e) => Report::new(e),
        _ => miette::miette!("{}", err),
    }
}
