//! Status lines on stderr.

use console::style;

pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", style("ℹ").blue().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(message).red());
}
