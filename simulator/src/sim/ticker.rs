//! Fixed-Cadence Run Driver.
//!
//! This module provides the clock that drives the simulations. It:
//! 1. **Paces:** Sleeps a fixed period before every cycle (zero runs flat out).
//! 2. **Caps:** Stops after a maximum number of cycles without treating it as a failure.
//! 3. **Cancels:** Checks a shared flag before each cycle and again after the sleep,
//!    so no cycle starts once cancellation is requested. A cycle already started is
//!    always finished, since every step is atomic.
//!
//! Cycles are numbered from 0 when handed to the work. Results always report the
//! number of cycles that ran, whatever stopped the run: completion during cycle `c`
//! reports `c + 1`, hitting the cap `m` reports `m`.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::common::{CoreMode, SimResult};
use crate::config::Config;
use crate::core::pipeline::{PipelineObserver, PipelineStepper};
use crate::core::SimContext;

/// Shared cancellation flag.
///
/// Clones observe the same flag, so a handle can be moved to another thread
/// (for example a Ctrl-C handler) while the ticker runs.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a flag in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the ticker stop before its next cycle.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    /// All work finished.
    Completed,
    /// The cycle cap was reached first.
    CycleCap,
    /// The cancel token was triggered.
    Cancelled,
}

/// Outcome of driving a tick function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickResult {
    /// Number of cycles that ran.
    pub cycles: u64,
    /// Why the run stopped.
    pub stop: StopReason,
}

/// Results summary handed to the presentation layer when a pipeline run stops.
///
/// `cycles` counts executed cycles for every stop reason and always equals the
/// `cycles` counter in [`crate::stats::RunStats`]. `last_cycle` is the zero-based
/// number of the final cycle, the one on which a completed run's last instruction
/// retired; it is `None` when no cycle ran.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    /// Cycles that ran.
    pub cycles: u64,
    /// Zero-based number of the last cycle that ran.
    pub last_cycle: Option<u64>,
    /// Instructions that retired.
    pub completed: usize,
    /// Instructions in the run.
    pub total: usize,
    /// Mode the run used.
    pub mode: CoreMode,
    /// Why the run stopped.
    pub stop: StopReason,
}

impl RunSummary {
    /// Whether every instruction retired.
    pub fn all_completed(&self) -> bool {
        self.completed == self.total
    }

    /// Share of instructions that retired, in percent.
    pub fn efficiency(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// Human readable result notice.
    pub fn message(&self) -> String {
        let head = if self.all_completed() {
            format!(
                "All {} instructions completed in {} cycles!",
                self.total, self.cycles
            )
        } else {
            format!(
                "{} of {} instructions completed in {} cycles ({:.1}% efficiency).",
                self.completed,
                self.total,
                self.cycles,
                self.efficiency()
            )
        };
        let remark = match self.mode {
            CoreMode::Multi => "Multi-core processes instructions in parallel!",
            CoreMode::Single => "Single-core processes instructions one after another.",
        };
        format!("{} {}", head, remark)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Fixed-period clock with an optional cycle cap.
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    max_cycles: Option<u64>,
    cancel: CancelToken,
}

impl Ticker {
    /// Creates a ticker. `max_cycles` of `None` runs until the work completes.
    pub fn new(period: Duration, max_cycles: Option<u64>) -> Self {
        Self {
            period,
            max_cycles,
            cancel: CancelToken::new(),
        }
    }

    /// Creates the pipeline ticker described by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.general.tick_period(),
            Some(config.pipeline.max_cycles),
        )
    }

    /// Replaces the cancel token, so an external handle can stop this ticker.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns a handle to this ticker's cancel flag.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Cycle cap, if any.
    pub fn max_cycles(&self) -> Option<u64> {
        self.max_cycles
    }

    /// Calls `tick` once per period until it reports completion, the cap is hit,
    /// or the run is cancelled.
    ///
    /// `tick` receives the zero-based cycle number and returns `Ok(true)` once the
    /// work is done. An error from `tick` stops the run and is returned as-is.
    pub fn drive<F>(&self, mut tick: F) -> SimResult<TickResult>
    where
        F: FnMut(u64) -> SimResult<bool>,
    {
        let mut cycle = 0;
        loop {
            if self.max_cycles.is_some_and(|cap| cycle >= cap) {
                return Ok(TickResult {
                    cycles: cycle,
                    stop: StopReason::CycleCap,
                });
            }
            if self.cancel.is_cancelled() {
                return Ok(TickResult {
                    cycles: cycle,
                    stop: StopReason::Cancelled,
                });
            }
            if !self.period.is_zero() {
                thread::sleep(self.period);
                if self.cancel.is_cancelled() {
                    return Ok(TickResult {
                        cycles: cycle,
                        stop: StopReason::Cancelled,
                    });
                }
            }
            if tick(cycle)? {
                return Ok(TickResult {
                    cycles: cycle + 1,
                    stop: StopReason::Completed,
                });
            }
            cycle += 1;
        }
    }

    /// Runs the pipeline held by `ctx` to completion, the cycle cap or cancellation.
    ///
    /// Resets the instruction set, then steps once per cycle and notifies
    /// `observer` after every step. Fails with a notice if a run is already active
    /// or no instructions are queued.
    pub fn run_pipeline(
        &self,
        ctx: &mut SimContext,
        observer: &mut dyn PipelineObserver,
    ) -> SimResult<RunSummary> {
        ctx.begin_run()?;
        info!(
            instructions = ctx.instructions.len(),
            mode = ctx.mode.as_str(),
            lanes = ctx.lane_count(),
            "pipeline run started"
        );

        let result = self.drive_context(ctx, observer);
        ctx.stats.tally_lanes(&ctx.instructions);
        ctx.end_run();
        let result = result?;

        let summary = RunSummary {
            cycles: result.cycles,
            last_cycle: result.cycles.checked_sub(1),
            completed: ctx.completed_count(),
            total: ctx.instructions.len(),
            mode: ctx.mode,
            stop: result.stop,
        };
        match summary.stop {
            StopReason::Completed => info!(cycles = summary.cycles, "pipeline run completed"),
            StopReason::CycleCap => warn!(
                cycles = summary.cycles,
                completed = summary.completed,
                total = summary.total,
                "pipeline run reached the cycle cap"
            ),
            StopReason::Cancelled => warn!(cycles = summary.cycles, "pipeline run cancelled"),
        }
        observer.on_finish(&summary)?;
        Ok(summary)
    }

    fn drive_context(
        &self,
        ctx: &mut SimContext,
        observer: &mut dyn PipelineObserver,
    ) -> SimResult<TickResult> {
        observer.on_reset(&ctx.instructions, ctx.mode)?;
        let stepper = ctx.stepper;
        let mode = ctx.mode;
        self.drive(|cycle| {
            let outcome = stepper.step(&mut ctx.instructions, mode, cycle);
            ctx.stats.record(&outcome);
            observer.on_cycle(cycle, &ctx.instructions, mode)?;
            Ok(PipelineStepper::is_run_complete(&ctx.instructions))
        })
    }
}
