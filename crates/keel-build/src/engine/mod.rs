//! Bundling engine seam and the production option overlay.
//!
//! The pipeline never bundles anything itself. It builds a [`BundleOptions`]
//! value with a fixed production policy and hands it to a [`BundleEngine`].

mod error;
mod esbuild;

pub use error::EngineError;
pub use esbuild::EsbuildEngine;

use crate::config::BuildConfig;
use crate::entries::EntrySet;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Banner comment prepended to every emitted file.
pub const BANNER: &str = "/* Optimized production build generated by Keel */";

/// Output module format.
///
/// Production builds emit ECMAScript modules only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Esm,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Esm => "esm",
        }
    }
}

/// Options handed to a bundling engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    /// Directory the engine runs in; entry patterns are relative to it
    pub cwd: PathBuf,
    /// Entry point patterns, exclusions included
    pub entries: EntrySet,
    /// Output directory
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    /// Emit type declarations
    pub dts: bool,
    /// Leave installed packages out of the bundle
    pub external_packages: bool,
    /// Comment prepended to emitted JavaScript
    pub banner: String,
    pub sourcemap: bool,
    pub minify: bool,
    /// Preserve identifier names when minifying
    pub keep_names: bool,
    /// Remove `out_dir` before writing
    pub clean: bool,
}

impl BundleOptions {
    /// Production overlay for a resolved config.
    ///
    /// Only `sourcemap` and `minify` come from the config; every other
    /// option is fixed.
    pub fn production(config: &BuildConfig, cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            entries: EntrySet::for_build(config),
            out_dir: cwd.join(&config.out_dir),
            format: OutputFormat::Esm,
            dts: false,
            external_packages: true,
            banner: BANNER.to_string(),
            sourcemap: config.sourcemap,
            minify: config.minify,
            keep_names: true,
            clean: true,
        }
    }
}

/// A bundling engine.
///
/// `invoke` succeeds once the engine has written all output. Any error it
/// returns ends the build.
#[async_trait]
pub trait BundleEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    async fn invoke(&self, options: &BundleOptions) -> Result<(), EngineError>;
}
