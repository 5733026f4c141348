//! Keel CLI - production builds for Node.js applications.
//!
//! This crate provides the command-line interface around `keel-build`: it
//! resolves configuration from files, environment and flags, drives the
//! build pipeline, and renders progress and errors in the terminal.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `keel build` and `keel config`
//! - [`config`] - layered configuration resolution with figment
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Spinner, status messages and the terminal build reporter
//!
//! # Example
//!
//! ```rust
//! use keel_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // CLI command implementations...
//!     Ok(())
//! }
//! ```

// Public modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, Result};
