//! # keel-build
//!
//! Production build pipeline for Keel applications.
//!
//! A build is a strict sequence: the previous output directory is removed,
//! the bundling engine compiles the source tree into a single ESM target, and
//! a runtime shim is appended to the compiled entry file. Each step must
//! finish before the next one starts. The first failure ends the run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use keel_build::{BuildConfig, BuildOrchestrator, EsbuildEngine};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig::new("src/**/*.ts", "index.js");
//! config.validate()?;
//!
//! let mut orchestrator = BuildOrchestrator::new(Arc::new(EsbuildEngine::default()), ".");
//! let summary = orchestrator.run(&config).await?;
//! println!("entry: {}", summary.entry_file.display());
//! # Ok(()) }
//! ```
//!
//! ## Seams
//!
//! - [`ConfigResolver`] turns caller overrides into a validated [`BuildConfig`].
//! - [`BundleEngine`] performs the actual bundling. [`EsbuildEngine`] drives an
//!   esbuild-compatible executable; tests substitute in-process fakes.
//! - [`Reporter`] observes the run. [`LogReporter`] forwards to `tracing`.

pub mod clean;
pub mod config;
pub mod engine;
pub mod entries;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod shim;

pub use clean::OutputCleaner;
pub use config::{BuildConfig, ConfigResolver, PartialConfig, SourcePatterns};
pub use engine::{BundleEngine, BundleOptions, EngineError, EsbuildEngine, OutputFormat};
pub use entries::EntrySet;
pub use error::{BuildError, ConfigError};
pub use orchestrator::{BuildOrchestrator, BuildRun, BuildState, BuildSummary, Outcome};
pub use report::{LogReporter, Reporter};
pub use shim::{ShimScript, inject_shim};

/// Result type alias for build pipeline operations.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;
