//! Structural Hazard Detection.
//!
//! This module implements the occupancy rule that orders instructions inside a
//! lane, and the lane partitioning used in multi-core mode. An instruction may only
//! move into a stage that the instruction ahead of it has already vacated.

use crate::common::CoreMode;

use super::instruction::Instruction;

/// Checks whether an instruction may advance this cycle.
///
/// Both stage values must be taken from the snapshot observed before the cycle
/// started, so that an instruction never moves into a slot the instruction ahead
/// vacates during the same cycle.
///
/// # Arguments
///
/// * `ahead` - Pre-step stage of the instruction directly ahead in the lane, or
///   `None` for the lane head
/// * `current` - Pre-step stage of the instruction being evaluated
///
/// # Returns
///
/// `true` if the instruction may move to `current + 1`, `false` if it must stall.
pub fn may_advance(ahead: Option<i8>, current: i8) -> bool {
    match ahead {
        None => true,
        Some(ahead) => ahead > current,
    }
}

/// Returns the lane an instruction belongs to.
///
/// Single-core mode has one lane. In multi-core mode the assigned core is the lane;
/// an instruction that has not been assigned yet falls back to round-robin by list
/// position, which is exactly what `reset_for_run` would assign.
pub fn lane_of(
    position: usize,
    instruction: &Instruction,
    mode: CoreMode,
    cores: usize,
) -> usize {
    match mode {
        CoreMode::Single => 0,
        CoreMode::Multi => instruction.core().unwrap_or(position) % cores.max(1),
    }
}

/// Partitions instruction positions into lanes, preserving list order within each lane.
///
/// # Returns
///
/// One vector of positions per lane. Single-core mode always yields one lane,
/// multi-core mode yields `cores` lanes (some possibly empty).
pub fn partition_lanes(
    instructions: &[Instruction],
    mode: CoreMode,
    cores: usize,
) -> Vec<Vec<usize>> {
    let lane_count = match mode {
        CoreMode::Single => 1,
        CoreMode::Multi => cores.max(1),
    };
    let mut lanes = vec![Vec::new(); lane_count];
    for (position, instruction) in instructions.iter().enumerate() {
        lanes[lane_of(position, instruction, mode, lane_count)].push(position);
    }
    lanes
}

/// Short explanations of the pipeline hazard classes, shown by the `hazards` command.
pub const HAZARD_NOTES: &[(&str, &str)] = &[
    (
        "Data hazard",
        "An instruction depends on the result of an earlier instruction that has not finished yet.",
    ),
    (
        "Structural hazard",
        "Several instructions need the same hardware resource in the same cycle.",
    ),
    (
        "Control hazard",
        "A branch (if, loop) decides which instruction comes next, so fetch has to wait or guess.",
    ),
];

/// Ways multi-core processors reduce hazard stalls.
pub const MULTI_CORE_MITIGATIONS: &[&str] = &[
    "Processing instructions on different cores",
    "Reducing data dependencies between streams of work",
    "Dedicated resources per core",
];
