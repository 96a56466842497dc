//! Simulation context.
//!
//! Owns everything a pipeline run mutates: the instruction set, the id counter,
//! the selected core mode and the run flag. The driving loop holds the context and
//! lends it to the stepper; there is no process-wide state.

use crate::common::{CoreMode, SimError, SimResult};
use crate::config::Config;
use crate::core::pipeline::{Instruction, PipelineStepper};
use crate::stats::RunStats;

/// State of one pipeline simulation.
#[derive(Debug)]
pub struct SimContext {
    /// Instructions in submission order.
    pub instructions: Vec<Instruction>,
    /// Active core mode.
    pub mode: CoreMode,
    /// Stepper used for every cycle of a run.
    pub stepper: PipelineStepper,
    /// Counters for the most recent run.
    pub stats: RunStats,
    next_id: u32,
    running: bool,
}

impl Default for SimContext {
    fn default() -> Self {
        Self::new(CoreMode::Single, PipelineStepper::default())
    }
}

impl SimContext {
    /// Creates an empty context.
    pub fn new(mode: CoreMode, stepper: PipelineStepper) -> Self {
        Self {
            instructions: Vec::new(),
            mode,
            stepper,
            stats: RunStats::default(),
            next_id: 0,
            running: false,
        }
    }

    /// Creates an empty context using the pipeline section of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.pipeline.mode,
            PipelineStepper::new(config.pipeline.cores),
        )
    }

    /// Whether a run is currently active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Queues a new instruction and returns its id.
    ///
    /// Refused while a run is active.
    pub fn add_instruction(&mut self) -> SimResult<u32> {
        if self.running {
            return Err(SimError::RunInProgress);
        }
        self.next_id += 1;
        self.instructions.push(Instruction::new(self.next_id));
        Ok(self.next_id)
    }

    /// Queues `count` instructions.
    pub fn add_instructions(&mut self, count: usize) -> SimResult<()> {
        for _ in 0..count {
            self.add_instruction()?;
        }
        Ok(())
    }

    /// Switches between single-core and multi-core mode.
    ///
    /// Refused while a run is active.
    pub fn toggle_mode(&mut self) -> SimResult<CoreMode> {
        self.set_mode(self.mode.toggled())?;
        Ok(self.mode)
    }

    /// Selects the core mode for the next run.
    ///
    /// Refused while a run is active.
    pub fn set_mode(&mut self, mode: CoreMode) -> SimResult<()> {
        if self.running {
            return Err(SimError::RunInProgress);
        }
        self.mode = mode;
        Ok(())
    }

    /// Marks the start of a run and resets every instruction for it.
    pub fn begin_run(&mut self) -> SimResult<()> {
        if self.running {
            return Err(SimError::RunInProgress);
        }
        if self.instructions.is_empty() {
            return Err(SimError::NoInstructions);
        }
        self.running = true;
        self.stepper.reset_for_run(&mut self.instructions, self.mode);
        self.stats = RunStats::new(self.instructions.len(), self.lane_count());
        Ok(())
    }

    /// Marks the end of a run. The instruction set keeps its final state.
    pub fn end_run(&mut self) {
        self.running = false;
    }

    /// Discards every instruction and restarts id numbering.
    ///
    /// Refused while a run is active.
    pub fn clear(&mut self) -> SimResult<()> {
        if self.running {
            return Err(SimError::RunInProgress);
        }
        self.instructions.clear();
        self.next_id = 0;
        self.stats = RunStats::default();
        Ok(())
    }

    /// Number of completed instructions.
    pub fn completed_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_completed()).count()
    }

    /// Lanes used by the current mode.
    pub fn lane_count(&self) -> usize {
        match self.mode {
            CoreMode::Single => 1,
            CoreMode::Multi => self.stepper.cores(),
        }
    }
}
