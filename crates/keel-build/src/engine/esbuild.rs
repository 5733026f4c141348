//! esbuild command-line integration

use super::{BundleEngine, BundleOptions, EngineError};
use crate::clean::remove_dir_if_exists;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs an esbuild-compatible executable as a child process.
///
/// The command line is split on whitespace, so package-manager launchers
/// such as `npx esbuild` or `pnpm exec esbuild` work as-is. Quotes are not
/// interpreted: a program path with spaces can't be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsbuildEngine {
    program: String,
    args: Vec<String>,
}

impl EsbuildEngine {
    pub const DEFAULT_COMMAND: &'static str = "esbuild";

    /// Create an engine from a command line such as `"npx esbuild"`.
    pub fn from_command_line(command: &str) -> Result<Self, EngineError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(EngineError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Arguments passed after the command line for the given options.
    pub fn arguments(
        &self,
        options: &BundleOptions,
        entries: &[PathBuf],
    ) -> Result<Vec<OsString>, EngineError> {
        if options.dts {
            return Err(EngineError::unsupported(self.name(), "type declaration emission"));
        }

        let mut args: Vec<OsString> = entries
            .iter()
            .map(|entry| relative_to(entry, &options.cwd).into_os_string())
            .collect();

        args.push("--bundle".into());
        args.push(format!("--format={}", options.format.as_str()).into());
        args.push("--platform=node".into());
        if options.external_packages {
            args.push("--packages=external".into());
        }

        let mut outdir = OsString::from("--outdir=");
        outdir.push(&options.out_dir);
        args.push(outdir);

        if !options.banner.is_empty() {
            args.push(format!("--banner:js={}", options.banner).into());
        }
        if options.keep_names {
            args.push("--keep-names".into());
        }
        if options.minify {
            args.push("--minify".into());
        }
        if options.sourcemap {
            args.push("--sourcemap".into());
        }
        args.push("--log-level=warning".into());

        Ok(args)
    }
}

impl Default for EsbuildEngine {
    fn default() -> Self {
        Self {
            program: Self::DEFAULT_COMMAND.to_string(),
            args: Vec::new(),
        }
    }
}

#[async_trait]
impl BundleEngine for EsbuildEngine {
    fn name(&self) -> &str {
        "esbuild"
    }

    async fn invoke(&self, options: &BundleOptions) -> Result<(), EngineError> {
        let entries = options.entries.resolve(&options.cwd)?;
        let args = self.arguments(options, &entries)?;

        if options.clean {
            remove_dir_if_exists(&options.out_dir).await?;
        }

        let command_line = self.command_line();
        debug!(command = %command_line, entries = entries.len(), "invoking bundling engine");

        let output = Command::new(&self.program)
            .args(&self.args)
            .args(&args)
            .current_dir(&options.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| EngineError::spawn_failed(&command_line, source))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(EngineError::exit_error(command_line, exit_code, stderr));
        }

        debug!(command = %command_line, "bundling engine finished");
        Ok(())
    }
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
