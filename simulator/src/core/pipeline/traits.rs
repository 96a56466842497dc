//! Pipeline Observer Interface.
//!
//! Defines the seam between the simulation and whatever presents it. Observers are
//! notified after state changes and only ever read the instruction set; they cannot
//! influence the run.

use std::io;

use crate::common::CoreMode;
use crate::core::pipeline::instruction::Instruction;
use crate::sim::ticker::RunSummary;

/// Receives the post-step state of a pipeline run.
pub trait PipelineObserver {
    /// Called once after the instruction set has been reset for a new run.
    fn on_reset(&mut self, _instructions: &[Instruction], _mode: CoreMode) -> io::Result<()> {
        Ok(())
    }

    /// Called after every cycle with the mutated instruction set.
    ///
    /// # Arguments
    ///
    /// * `cycle` - Zero-based number of the cycle that just ran.
    /// * `instructions` - The instruction set after the step.
    /// * `mode` - Mode of the running simulation.
    fn on_cycle(
        &mut self,
        cycle: u64,
        instructions: &[Instruction],
        mode: CoreMode,
    ) -> io::Result<()>;

    /// Called once when the run stops, for whatever reason.
    fn on_finish(&mut self, _summary: &RunSummary) -> io::Result<()> {
        Ok(())
    }
}

/// Observer that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {
    fn on_cycle(
        &mut self,
        _cycle: u64,
        _instructions: &[Instruction],
        _mode: CoreMode,
    ) -> io::Result<()> {
        Ok(())
    }
}
