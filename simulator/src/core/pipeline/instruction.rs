//! Instruction records flowing through the pipeline.
//!
//! An instruction is an abstract token: it has an identity, a position in the
//! pipeline and, in multi-core mode, the core it was assigned to. The stepper is
//! the only component that moves it.

use serde::Serialize;

use super::stage::{Stage, NOT_STARTED, NUM_STAGES, RETIRED};

/// A single instruction in the simulated pipeline.
///
/// Fields are read-only outside the pipeline module, so `completed` stays `true`
/// exactly when `current_stage >= NUM_STAGES`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Unique, monotonically assigned identifier (starts at 1).
    id: u32,
    /// Stage index, `-1` before entering the pipeline, `4` once retired.
    current_stage: i8,
    /// Whether the instruction has left the last stage.
    completed: bool,
    /// Core the instruction is pinned to; only set during multi-core runs.
    core: Option<usize>,
}

/// Lifecycle position of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionState {
    /// Waiting to enter Fetch.
    NotStarted,
    /// Occupying a pipeline stage.
    InStage(Stage),
    /// Left Write Back. Terminal.
    Completed,
}

impl Instruction {
    /// Creates an instruction that has not entered the pipeline.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            current_stage: NOT_STARTED,
            completed: false,
            core: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Stage index: `-1` not started, `0..=3` in a stage, `4` retired.
    pub fn current_stage(&self) -> i8 {
        self.current_stage
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Core assigned for the current multi-core run, if any.
    pub fn core(&self) -> Option<usize> {
        self.core
    }

    /// Display name (`INST<id>`).
    pub fn name(&self) -> String {
        format!("INST{}", self.id)
    }

    /// Returns the lifecycle state derived from `current_stage`.
    pub fn state(&self) -> InstructionState {
        if self.completed {
            return InstructionState::Completed;
        }
        match usize::try_from(self.current_stage)
            .ok()
            .and_then(Stage::from_index)
        {
            Some(stage) => InstructionState::InStage(stage),
            None => InstructionState::NotStarted,
        }
    }

    /// Returns the stage currently occupied, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self.state() {
            InstructionState::InStage(stage) => Some(stage),
            _ => None,
        }
    }

    /// Moves the instruction one stage forward, retiring it past Write Back.
    pub(crate) fn advance(&mut self) {
        if self.completed {
            return;
        }
        self.current_stage += 1;
        if self.current_stage as usize >= NUM_STAGES {
            self.current_stage = RETIRED;
            self.completed = true;
        }
    }

    /// Returns the instruction to its pre-run state.
    pub(crate) fn reset(&mut self, core: Option<usize>) {
        self.current_stage = NOT_STARTED;
        self.completed = false;
        self.core = core;
    }
}
