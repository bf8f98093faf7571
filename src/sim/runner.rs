use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::context::AppContext;
use crate::types::{DemoId, Severity};

/// Summary toast emitted once a run completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub message: String,
    pub severity: Severity,
}

impl Completion {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }
}

/// Result of triggering a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The run went through all steps and emitted its toast.
    Completed { steps: usize, notification_id: String },
    /// Another run of the same demo was in progress; nothing happened.
    AlreadyRunning,
    /// The demo was reset mid-run. The run stopped after `steps` steps
    /// without a toast.
    Interrupted { steps: usize },
}

/// Step logic for one demo. The [`Runner`] owns pacing, progress, the
/// re-entry guard and the completion toast; a scenario only says what each
/// step writes into the store.
pub trait Scenario: Send + Sync + 'static {
    /// Demo whose store fields this scenario drives.
    fn demo(&self) -> DemoId;

    /// Number of steps in one run.
    fn total_steps(&self) -> usize;

    /// Delay awaited after `step` completes.
    fn step_delay(&self, ctx: &AppContext, step: usize) -> Duration;

    /// Prepares the store before the first step.
    fn begin(&self, _ctx: &AppContext) {}

    /// Writes the record for `step` into the store.
    fn step(&self, ctx: &AppContext, step: usize);

    /// Final writes after the last step; returns the summary toast.
    fn finish(&self, ctx: &AppContext) -> Completion;
}

/// Percentage shown after `step` (zero-based) of `total` has completed.
pub fn progress_after(step: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (step + 1) as f64 / total as f64 * 100.0
}

/// Drives a [`Scenario`] from idle to complete: `Idle → Running(1..N) → Complete → Idle`.
pub struct Runner<S: Scenario> {
    ctx: AppContext,
    scenario: Arc<S>,
}

impl<S: Scenario> Clone for Runner<S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            scenario: self.scenario.clone(),
        }
    }
}

impl<S: Scenario> Runner<S> {
    /// Create a new Runner for `scenario` over `ctx`.
    pub fn new(ctx: AppContext, scenario: S) -> Self {
        Self {
            ctx,
            scenario: Arc::new(scenario),
        }
    }

    pub fn scenario(&self) -> &S {
        &self.scenario
    }

    /// Performs step `step` without any delay and returns the resulting
    /// progress. Does not touch the running flag.
    pub fn step_once(&self, step: usize) -> f64 {
        let demo = self.scenario.demo();
        let total = self.scenario.total_steps();
        let store = self.ctx.store();

        store.set_current_step(demo, step);
        self.scenario.step(&self.ctx, step);
        let progress = progress_after(step, total);
        store.set_progress(demo, progress);
        log::debug!("{}: step {}/{} -> {:.1}%", demo, step + 1, total, progress);
        progress
    }

    /// Runs to completion. A second call while a run is in flight returns
    /// [`RunOutcome::AlreadyRunning`] without changing anything. A reset of
    /// the demo makes the run stop at its next step boundary.
    pub async fn run(&self) -> RunOutcome {
        let demo = self.scenario.demo();
        let store = self.ctx.store();

        let Some(run_id) = store.try_begin_run(demo) else {
            log::debug!("{}: run already in progress, ignoring trigger", demo);
            return RunOutcome::AlreadyRunning;
        };

        let total = self.scenario.total_steps();
        log::info!("{}: run {} started ({} steps)", demo, run_id, total);
        store.set_progress(demo, 0.0);
        self.scenario.begin(&self.ctx);

        for step in 0..total {
            if !store.is_current_run(demo, run_id) {
                return self.interrupted(run_id, step);
            }
            self.step_once(step);
            let delay = self.scenario.step_delay(&self.ctx, step);
            self.ctx.clock().sleep(delay).await;
        }

        if !store.is_current_run(demo, run_id) {
            return self.interrupted(run_id, total);
        }
        let completion = self.scenario.finish(&self.ctx);
        if !store.finish_run(demo, run_id) {
            return self.interrupted(run_id, total);
        }
        let notification_id = self
            .ctx
            .notifications()
            .notify(completion.message, completion.severity);
        log::info!("{}: run {} complete", demo, run_id);

        RunOutcome::Completed {
            steps: total,
            notification_id,
        }
    }

    fn interrupted(&self, run_id: u64, steps: usize) -> RunOutcome {
        log::info!("{}: run {} reset after {} steps", self.scenario.demo(), run_id, steps);
        RunOutcome::Interrupted { steps }
    }

    /// Spawns [`Runner::run`] on the tokio runtime.
    pub fn spawn(&self) -> JoinHandle<RunOutcome> {
        let this = self.clone();
        tokio::spawn(async move { this.run().await })
    }
}
