//! Instruction pipeline implementation.
//!
//! This module contains the four-stage instruction pipeline (fetch, decode,
//! execute, write back), the instruction records that flow through it, the
//! structural hazard rule that orders them, and the observer seam used by
//! renderers.

/// Structural hazard rule and lane partitioning.
pub mod hazards;

/// Instruction records and lifecycle states.
pub mod instruction;

/// Stage labels and stage-index constants.
pub mod stage;

/// Cycle-by-cycle state transition.
pub mod stepper;

/// Observer interface for presenting pipeline state.
pub mod traits;

pub use instruction::{Instruction, InstructionState};
pub use stage::{Stage, NUM_STAGES};
pub use stepper::{PipelineStepper, StepOutcome};
pub use traits::{NullObserver, PipelineObserver};
