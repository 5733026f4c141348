//! Logging setup for the Keel CLI.
//!
//! Structured logging goes through `tracing`. The build reporter in
//! [`crate::ui`] owns the user-facing progress lines; log records are for
//! diagnostics and land on stderr next to them.
//!
//! # Verbosity
//!
//! 1. `--verbose`: debug level for the keel crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`: custom filter
//! 4. Otherwise: info level for the keel crates
//!
//! ```rust,no_run
//! use keel_cli::logger::init_logger;
//! use tracing::debug;
//!
//! init_logger(false, false, false);
//! debug!(entry = "dist/index.js", "injecting shim");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) const VERBOSE_FILTER: &str = "keel=debug,keel_build=debug,keel_cli=debug";
pub(crate) const QUIET_FILTER: &str = "keel=error,keel_build=error,keel_cli=error";
pub(crate) const DEFAULT_FILTER: &str = "keel=info,keel_build=info,keel_cli=info";

/// Pick the filter directives for the given flags.
///
/// `--verbose` wins over `--quiet`; clap rejects the combination anyway.
pub fn filter_directives(verbose: bool, quiet: bool) -> Option<&'static str> {
    if verbose {
        Some(VERBOSE_FILTER)
    } else if quiet {
        Some(QUIET_FILTER)
    } else {
        None
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup, before anything logs. A second call is a no-op.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = match filter_directives(verbose, quiet) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
