//! Runtime shim appended to the compiled entry file.
//!
//! The only shim today is the anti-crash monitor. It registers
//! process-wide handlers for uncaught exceptions and unhandled rejections
//! that log the error and keep the process running. Each handler is only
//! registered when no listener for that event exists yet, so injecting the
//! block more than once still leaves exactly one handler per event.

use crate::error::BuildError;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Tag prefixed to every line the monitor prints.
pub const MONITOR_TAG: &str = "[Keel Anti-Crash Monitor]";

const ANTI_CRASH_MONITOR: &str = r#"

// --- Keel Anti-Crash Monitor ---
;(()=>{
  'use strict';
  // Listeners for 'uncaughtException' normally do synchronous cleanup before exit.
  // This one logs and returns so long-running services stay up.
  const p = (t) => `\x1b[33m${t}\x1b[0m`, b = '[Keel Anti-Crash Monitor]', l = console.log, e1 = 'uncaughtException', e2 = 'unhandledRejection';
  if (!process.eventNames().includes(e1)) // already handled elsewhere
    process.on(e1, (e) => {
      l(p(`${b} Uncaught Exception`)); l(p(b), p((e && e.stack) || e));
    });
  if (!process.eventNames().includes(e2)) // already handled elsewhere
    process.on(e2, (r) => {
      l(p(`${b} Unhandled promise rejection`)); l(p(`${b} ${(r && r.stack) || r}`));
    });
})();
// --- Keel Anti-Crash Monitor ---
"#;

/// The text appended to the compiled entry file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShimScript {
    anti_crash: bool,
}

impl ShimScript {
    pub fn new(anti_crash: bool) -> Self {
        Self { anti_crash }
    }

    pub fn as_str(&self) -> &'static str {
        if self.anti_crash {
            ANTI_CRASH_MONITOR
        } else {
            ""
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Display for ShimScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append the shim to `out_dir/main`.
///
/// The file must already exist; it is opened append-only and never created.
/// With `anti_crash` off nothing is written, but a missing file is still an
/// error.
pub async fn inject_shim(out_dir: &Path, main: &Path, anti_crash: bool) -> Result<PathBuf, BuildError> {
    let path = out_dir.join(main);
    let script = ShimScript::new(anti_crash);

    let inject_error = |source| BuildError::Inject {
        path: path.clone(),
        source,
    };

    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .await
        .map_err(inject_error)?;
    file.write_all(script.as_str().as_bytes())
        .await
        .map_err(inject_error)?;
    file.flush().await.map_err(inject_error)?;

    debug!(path = %path.display(), bytes = script.as_str().len(), "appended runtime shim");
    Ok(path)
}
