//! `keel build`.

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::config::FileConfigResolver;
use crate::error::Result;
use crate::ui::TerminalReporter;
use keel_build::{BuildOrchestrator, ConfigResolver, EsbuildEngine};
use std::sync::Arc;
use tracing::debug;

/// Execute the build command.
///
/// Configuration and the engine command line are checked before the output
/// directory is touched; a bad config never deletes a previous build.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let root = utils::project_root(args.cwd.as_deref())?;

    let config = FileConfigResolver::new(&root)
        .with_config_file(args.config.clone())
        .resolve(&args.to_partial())?;
    let engine = EsbuildEngine::from_command_line(&args.engine)?;
    debug!(
        root = %root.display(),
        engine = %engine.command_line(),
        "starting build"
    );

    let mut orchestrator =
        BuildOrchestrator::new(Arc::new(engine), &root).with_reporter(TerminalReporter::new());
    let summary = orchestrator.run(&config).await?;

    debug!(
        entry = %summary.entry_file.display(),
        shim = summary.shim_injected,
        "build finished"
    );
    Ok(())
}
