//! Discrete-time pipeline stepper.
//!
//! The stepper is a pure state transition over a slice of [`Instruction`]s: each call to
//! [`PipelineStepper::step`] advances the whole set by exactly one cycle. It never
//! renders, sleeps or allocates long-lived state; the driving loop owns the clock
//! and observers read the slice after each step.

use tracing::debug;

use crate::common::{CoreMode, DEFAULT_CORES};

use super::hazards;
use super::instruction::Instruction;

/// Per-cycle movement counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Instructions that moved one stage (including retirements).
    pub advanced: usize,
    /// In-flight or waiting instructions held back by the instruction ahead.
    pub stalled: usize,
    /// Instructions that left Write Back this cycle.
    pub retired: usize,
}

/// Advances instructions through a fixed four-stage pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineStepper {
    cores: usize,
}

impl Default for PipelineStepper {
    fn default() -> Self {
        Self::new(DEFAULT_CORES)
    }
}

impl PipelineStepper {
    /// Creates a stepper that uses `cores` lanes in multi-core mode (minimum 1).
    pub fn new(cores: usize) -> Self {
        Self {
            cores: cores.max(1),
        }
    }

    /// Number of lanes used in multi-core mode.
    pub fn cores(&self) -> usize {
        self.cores
    }

    /// Prepares instructions for a new run.
    ///
    /// Every instruction returns to the not-started state. In multi-core mode each
    /// instruction is pinned to core `index mod cores`; in single-core mode the core
    /// assignment is cleared. Calling this twice has the same effect as calling it once.
    pub fn reset_for_run(&self, instructions: &mut [Instruction], mode: CoreMode) {
        for (index, instruction) in instructions.iter_mut().enumerate() {
            let core = match mode {
                CoreMode::Single => None,
                CoreMode::Multi => Some(index % self.cores),
            };
            instruction.reset(core);
        }
    }

    /// Advances every lane by one cycle.
    ///
    /// Lanes are independent: the result does not depend on the order in which they
    /// are processed. Within a lane the head always advances, every other instruction
    /// advances only if the instruction ahead of it was in a strictly later stage
    /// before this cycle began.
    pub fn step(
        &self,
        instructions: &mut [Instruction],
        mode: CoreMode,
        cycle: u64,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        for lane in hazards::partition_lanes(instructions, mode, self.cores) {
            advance_lane(instructions, &lane, &mut outcome);
        }

        debug!(
            cycle,
            mode = mode.as_str(),
            advanced = outcome.advanced,
            stalled = outcome.stalled,
            retired = outcome.retired,
            "pipeline cycle"
        );
        outcome
    }

    /// Returns `true` when every instruction has retired.
    pub fn is_run_complete(instructions: &[Instruction]) -> bool {
        instructions.iter().all(|instruction| instruction.is_completed())
    }
}

fn advance_lane(instructions: &mut [Instruction], lane: &[usize], outcome: &mut StepOutcome) {
    let before: Vec<i8> = lane
        .iter()
        .map(|&position| instructions[position].current_stage())
        .collect();

    for (slot, &position) in lane.iter().enumerate() {
        let instruction = &mut instructions[position];
        if instruction.is_completed() {
            continue;
        }

        let ahead = slot.checked_sub(1).map(|prev| before[prev]);
        if hazards::may_advance(ahead, before[slot]) {
            instruction.advance();
            outcome.advanced += 1;
            if instruction.is_completed() {
                outcome.retired += 1;
            }
        } else {
            outcome.stalled += 1;
        }
    }
}
