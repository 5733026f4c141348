//! Build pipeline state machine.
//!
//! A run moves through `Idle → Cleaning → Bundling → Injecting` and ends in
//! `Succeeded` or `Failed`. Steps are strictly sequential and the first error
//! is terminal; nothing is retried.
//!
//! Two runs against the same output directory at the same time are
//! undefined behaviour. The output directory is owned by one run by
//! convention only; there is no locking.

use crate::clean::OutputCleaner;
use crate::config::BuildConfig;
use crate::engine::{BundleEngine, BundleOptions};
use crate::error::BuildError;
use crate::report::{self, LogReporter, Reporter};
use crate::shim::inject_shim;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Pipeline state of a build run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Cleaning,
    Bundling,
    Injecting,
    Succeeded,
    Failed,
}

impl BuildState {
    pub fn can_transition_to(self, next: BuildState) -> bool {
        use BuildState::*;
        matches!(
            (self, next),
            (Idle, Cleaning)
                | (Cleaning, Bundling)
                | (Cleaning, Failed)
                | (Bundling, Injecting)
                | (Bundling, Failed)
                | (Injecting, Succeeded)
                | (Injecting, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BuildState::Succeeded | BuildState::Failed)
    }
}

/// Final result of a run. `Failed` carries the error detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Succeeded,
    Failed { detail: String },
}

/// One build attempt. Created at start, finalized exactly once.
#[derive(Debug)]
pub struct BuildRun {
    started: Instant,
    state: BuildState,
    outcome: Outcome,
    history: Vec<BuildState>,
}

impl BuildRun {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            state: BuildState::Idle,
            outcome: Outcome::Pending,
            history: vec![BuildState::Idle],
        }
    }

    /// Enter `Cleaning` and restart the clock.
    fn begin(&mut self) {
        self.advance(BuildState::Cleaning);
        self.started = Instant::now();
    }

    fn advance(&mut self, next: BuildState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal build transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "build state");
        self.state = next;
        self.history.push(next);
    }

    fn finish(&mut self, outcome: Outcome) {
        debug_assert_eq!(self.outcome, Outcome::Pending, "build run finalized twice");
        let terminal = match outcome {
            Outcome::Failed { .. } => BuildState::Failed,
            _ => BuildState::Succeeded,
        };
        self.advance(terminal);
        self.outcome = outcome;
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Every state the run has been in, in order.
    pub fn history(&self) -> &[BuildState] {
        &self.history
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }
}

/// Returned by a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub elapsed: Duration,
    /// Compiled entry file the shim step touched
    pub entry_file: PathBuf,
    /// Whether a non-empty shim was appended
    pub shim_injected: bool,
}

/// Sequences cleanup, bundling and shim injection, reporting throughout.
pub struct BuildOrchestrator<R = LogReporter> {
    engine: Arc<dyn BundleEngine>,
    reporter: R,
    project_root: PathBuf,
}

impl BuildOrchestrator<LogReporter> {
    /// Create an orchestrator that logs through `tracing`.
    ///
    /// `project_root` is the directory all config paths are relative to.
    pub fn new(engine: Arc<dyn BundleEngine>, project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            engine,
            reporter: LogReporter,
            project_root: std::path::absolute(&project_root).unwrap_or(project_root),
        }
    }
}

impl<R: Reporter> BuildOrchestrator<R> {
    pub fn with_reporter<T: Reporter>(self, reporter: T) -> BuildOrchestrator<T> {
        BuildOrchestrator {
            engine: self.engine,
            reporter,
            project_root: self.project_root,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Run one build and return its summary or the error that ended it.
    pub async fn run(&mut self, config: &BuildConfig) -> Result<BuildSummary, BuildError> {
        let (run, result) = self.run_to_completion(config).await;
        debug_assert!(run.is_finished());
        result
    }

    /// Run one build and also hand back the finished [`BuildRun`].
    pub async fn run_to_completion(
        &mut self,
        config: &BuildConfig,
    ) -> (BuildRun, Result<BuildSummary, BuildError>) {
        let mut run = BuildRun::new();
        run.begin();
        self.reporter.started(report::PROGRESS_MESSAGE);

        let result = self.execute(&mut run, config).await;
        let elapsed = run.elapsed();

        match result {
            Ok(entry_file) => {
                run.finish(Outcome::Succeeded);
                self.reporter.succeeded(elapsed);
                self.reporter.hint(&report::start_hint(report::START_COMMAND));

                let summary = BuildSummary {
                    elapsed,
                    entry_file,
                    shim_injected: config.anti_crash,
                };
                (run, Ok(summary))
            }
            Err(err) => {
                run.finish(Outcome::Failed {
                    detail: report::error_detail(&err),
                });
                self.reporter.failed(elapsed, &err);
                (run, Err(err))
            }
        }
    }

    async fn execute(&self, run: &mut BuildRun, config: &BuildConfig) -> Result<PathBuf, BuildError> {
        let cleaner = OutputCleaner::new(&self.project_root);
        let out_dir = cleaner.clean(&config.out_dir).await?;

        run.advance(BuildState::Bundling);
        let options = BundleOptions::production(config, &self.project_root);
        debug!(engine = self.engine.name(), patterns = ?options.entries.patterns(), "bundling");
        self.engine.invoke(&options).await?;

        run.advance(BuildState::Injecting);
        inject_shim(&out_dir, &config.main, config.anti_crash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BuildState::*;

    #[test]
    fn test_transitions() {
        assert!(Idle.can_transition_to(Cleaning));
        assert!(Cleaning.can_transition_to(Bundling));
        assert!(Bundling.can_transition_to(Injecting));
        assert!(Bundling.can_transition_to(Failed));
        assert!(Injecting.can_transition_to(Succeeded));
        assert!(Injecting.can_transition_to(Failed));

        // No skipping ahead, no leaving terminal states
        assert!(!Idle.can_transition_to(Bundling));
        assert!(!Bundling.can_transition_to(Succeeded));
        assert!(!Succeeded.can_transition_to(Cleaning));
        assert!(!Failed.can_transition_to(Cleaning));
        assert!(!Failed.can_transition_to(Succeeded));
    }

    #[test]
    fn test_run_lifecycle() {
        let mut run = BuildRun::new();
        assert_eq!(run.state(), Idle);
        assert_eq!(run.outcome(), &Outcome::Pending);

        run.begin();
        run.advance(Bundling);
        run.finish(Outcome::Failed {
            detail: "boom".to_string(),
        });

        assert!(run.is_finished());
        assert_eq!(run.history(), &[Idle, Cleaning, Bundling, Failed]);
        assert_eq!(
            run.outcome(),
            &Outcome::Failed {
                detail: "boom".to_string()
            }
        );
    }

    #[test]
    #[should_panic(expected = "illegal build transition")]
    #[cfg(debug_assertions)]
    fn test_illegal_transition_asserts() {
        let mut run = BuildRun::new();
        run.advance(Injecting);
    }
}
