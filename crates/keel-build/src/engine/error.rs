//! Error types for bundling engine invocations

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by a bundling engine.
///
/// The pipeline passes these through unchanged; it never translates or
/// retries them.
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    /// No file matched the entry patterns
    #[error("No entry points matched {patterns:?}")]
    #[diagnostic(
        code(keel::engine::no_entries),
        help("Check the 'src' patterns in keel.config.json")
    )]
    NoEntries { patterns: Vec<String> },

    /// An entry pattern isn't a valid glob
    #[error("Invalid entry pattern '{pattern}'")]
    #[diagnostic(code(keel::engine::invalid_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    /// Walking the source tree failed
    #[error("Failed to walk the source tree")]
    #[diagnostic(code(keel::engine::walk_failed))]
    Walk {
        #[source]
        source: ignore::Error,
    },

    /// The engine command line is empty
    #[error("Bundling engine command is empty")]
    #[diagnostic(
        code(keel::engine::empty_command),
        help("Pass --engine <command>, e.g. --engine \"npx esbuild\"")
    )]
    EmptyCommand,

    /// Failed to spawn the engine process
    #[error("Failed to spawn bundling engine '{command}'")]
    #[diagnostic(
        code(keel::engine::spawn_failed),
        help("Install esbuild (npm install -D esbuild) or pass --engine <command>")
    )]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Engine process exited with non-zero status
    #[error("Bundling engine '{command}' exited with code {exit_code}")]
    #[diagnostic(code(keel::engine::exit_error))]
    Exit {
        command: String,
        exit_code: i32,
        #[help]
        stderr: String,
    },

    /// The engine can't honour a requested option
    #[error("Bundling engine '{engine}' does not support {feature}")]
    #[diagnostic(code(keel::engine::unsupported))]
    Unsupported {
        engine: String,
        feature: &'static str,
    },

    /// I/O error while preparing the engine's output
    #[error("Bundling engine I/O error")]
    #[diagnostic(code(keel::engine::io))]
    Io(#[from] std::io::Error),

    /// Error reported by an engine without further structure
    #[error("{message}")]
    #[diagnostic(code(keel::engine::failed))]
    Failed { message: String },
}

impl EngineError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: ignore::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn walk(source: ignore::Error) -> Self {
        Self::Walk { source }
    }

    pub fn spawn_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    pub fn exit_error(command: impl Into<String>, exit_code: i32, stderr: String) -> Self {
        Self::Exit {
            command: command.into(),
            exit_code,
            stderr,
        }
    }

    pub fn unsupported(engine: impl Into<String>, feature: &'static str) -> Self {
        Self::Unsupported {
            engine: engine.into(),
            feature,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}
