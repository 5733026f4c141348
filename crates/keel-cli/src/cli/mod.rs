//! Command-line interface definition.
//!
//! - `keel build` - production build of a Node.js application
//! - `keel config` - print the resolved configuration, its JSON schema, or an
//!   example config file

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, Command, ConfigArgs};

/// Keel - production builds for Node.js applications
#[derive(Parser, Debug)]
#[command(
    name = "keel",
    version,
    about = "Production builds for Node.js applications",
    long_about = "Keel bundles a Node.js application into a clean output directory with esbuild\n\
                  and appends a small runtime monitor that logs uncaught exceptions and\n\
                  unhandled rejections instead of crashing the process."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
