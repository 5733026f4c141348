//! Error handling for the Keel CLI.
//!
//! `CliError` is the top-level error returned by commands. Domain errors from
//! `keel-build` convert into it via `#[from]`, keeping their diagnostics so
//! `main` can render them with miette.

mod diagnostic;

pub use diagnostic::cli_error_to_miette;
pub use keel_build::{BuildError, ConfigError, EngineError};

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be resolved or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The build pipeline failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// The bundling engine could not be set up
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
