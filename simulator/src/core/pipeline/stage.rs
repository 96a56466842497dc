//! Pipeline stage labels.
//!
//! The pipeline has a fixed sequence of four stages. A stage carries no state of its
//! own; it is an index with a display name.

use std::fmt;

use serde::Serialize;

/// Number of stages every instruction passes through.
pub const NUM_STAGES: usize = 4;

/// Stage value of an instruction that has not entered the pipeline yet.
pub const NOT_STARTED: i8 = -1;

/// Stage value written when an instruction leaves the last stage.
pub const RETIRED: i8 = NUM_STAGES as i8;

/// One phase of instruction processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Instruction decode.
    Decode,
    /// Execution.
    Execute,
    /// Result write back.
    WriteBack,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; NUM_STAGES] = [
        Stage::Fetch,
        Stage::Decode,
        Stage::Execute,
        Stage::WriteBack,
    ];

    /// Position of the stage in the pipeline, starting at 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the stage at `index`, or `None` past the last stage.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Fetch => "Fetch",
            Stage::Decode => "Decode",
            Stage::Execute => "Execute",
            Stage::WriteBack => "Write Back",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
