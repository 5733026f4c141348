//! Terminal output for the Keel CLI.
//!
//! Everything here writes to stderr so stdout stays free for command output
//! such as `keel config --schema`. When stderr isn't a terminal the spinner
//! degrades to plain lines.
//!
//! ```no_run
//! use keel_cli::ui;
//!
//! ui::init_colors(false);
//!
//! let spinner = ui::Spinner::new("Creating optimized production build...");
//! spinner.finish("Build completed in 12.34ms!");
//! ui::info("Run keel start to start your application.");
//! ```

mod messages;
mod reporter;
mod spinner;

pub use messages::{error, info, success};
pub use reporter::TerminalReporter;
pub use spinner::Spinner;

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether
/// stderr is attended.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support for `console` styling.
///
/// Call early in `main`. `--no-color` turns colors off regardless of the
/// environment.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}
