//! Error types for configuration resolution and the build pipeline.
//!
//! Configuration errors are raised before anything touches the filesystem.
//! Build errors carry the step that failed; engine errors pass through
//! unchanged inside [`BuildError::Bundle`].

use crate::engine::EngineError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or validating a [`BuildConfig`](crate::BuildConfig).
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An explicitly requested config file doesn't exist
    #[error("Config file not found: {}", .0.display())]
    #[diagnostic(
        code(keel::config::not_found),
        help("Create keel.config.json in the project root or pass --config <path>")
    )]
    NotFound(PathBuf),

    /// A required field has no value from any source
    #[error("Missing required field: {field}")]
    #[diagnostic(code(keel::config::missing_field))]
    MissingField {
        /// Name of the missing field
        field: String,
        /// How to provide the field
        #[help]
        hint: String,
    },

    /// A field has a value that can't be used
    #[error("Invalid value for '{field}': {value}")]
    #[diagnostic(code(keel::config::invalid_value))]
    InvalidValue {
        /// Name of the field with the invalid value
        field: String,
        /// The rejected value
        value: String,
        /// What a valid value looks like
        #[help]
        hint: String,
    },

    /// I/O error while reading a config source
    #[error("Failed to read config file")]
    #[diagnostic(code(keel::config::io))]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn missing_field(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            hint: hint.into(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            hint: hint.into(),
        }
    }
}

/// Errors that end a build run.
///
/// Every variant is terminal for the run; nothing is retried.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    /// The output directory contains the project root
    #[error("Refusing to clean {}: it contains the project root", .0.display())]
    #[diagnostic(
        code(keel::build::unsafe_out_dir),
        help("Point outDir at a dedicated build directory such as 'dist'")
    )]
    UnsafeOutputDir(PathBuf),

    /// Removing the previous output failed
    #[error("Failed to clean output directory {}", .path.display())]
    #[diagnostic(
        code(keel::build::clean_failed),
        help("Check output directory permissions")
    )]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bundling engine reported an error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Bundle(#[from] EngineError),

    /// Appending the runtime shim to the compiled entry file failed
    #[error("Failed to inject runtime shim into {}", .path.display())]
    #[diagnostic(
        code(keel::build::inject_failed),
        help("Check that 'main' names a file the bundler emits inside outDir")
    )]
    Inject {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
