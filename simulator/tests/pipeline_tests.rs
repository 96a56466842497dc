//! Tests for the pipeline stepper: reset, hazard rule and fill/drain scenarios.

use cpu_compare::common::CoreMode;
use cpu_compare::core::pipeline::hazards::{may_advance, partition_lanes};
use cpu_compare::core::pipeline::{Instruction, InstructionState, PipelineStepper, Stage};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Creates `n` fresh instructions numbered from 1.
fn instructions(n: u32) -> Vec<Instruction> {
    (1..=n).map(Instruction::new).collect()
}

/// Steps until every instruction retires, returning the cycle each one retired on.
fn retirement_cycles(
    stepper: &PipelineStepper,
    insts: &mut [Instruction],
    mode: CoreMode,
) -> Vec<u64> {
    let mut retired_at = vec![None; insts.len()];
    stepper.reset_for_run(insts, mode);
    let mut cycle = 0;
    while !PipelineStepper::is_run_complete(insts) {
        stepper.step(insts, mode, cycle);
        for (i, inst) in insts.iter().enumerate() {
            if inst.is_completed() && retired_at[i].is_none() {
                retired_at[i] = Some(cycle);
            }
        }
        cycle += 1;
        assert!(cycle < 100, "run did not terminate");
    }
    retired_at.into_iter().map(|c| c.unwrap_or(u64::MAX)).collect()
}

/// Tests that reset clears progress and core assignment in single-core mode.
#[test]
fn test_reset_single_core() {
    let stepper = PipelineStepper::default();
    let mut insts = instructions(5);
    stepper.reset_for_run(&mut insts, CoreMode::Multi);
    for cycle in 0..5 {
        stepper.step(&mut insts, CoreMode::Multi, cycle);
    }
    assert!(insts[0].is_completed());
    assert_eq!(insts[4].current_stage(), 3);
    assert_eq!(insts[4].core(), Some(0));

    stepper.reset_for_run(&mut insts, CoreMode::Single);

    for inst in &insts {
        assert_eq!(inst.current_stage(), -1);
        assert!(!inst.is_completed());
        assert_eq!(inst.core(), None);
        assert_eq!(inst.state(), InstructionState::NotStarted);
    }
}

/// Tests round-robin core assignment in multi-core mode.
#[test]
fn test_reset_multi_core_assigns_round_robin() {
    let stepper = PipelineStepper::default();
    let mut insts = instructions(6);
    stepper.reset_for_run(&mut insts, CoreMode::Multi);

    let cores: Vec<Option<usize>> = insts.iter().map(Instruction::core).collect();
    assert_eq!(cores, vec![Some(0), Some(1), Some(2), Some(3), Some(0), Some(1)]);
}

/// Tests that reset is idempotent.
#[test]
fn test_reset_is_idempotent() {
    let stepper = PipelineStepper::new(3);
    let mut once = instructions(5);
    stepper.reset_for_run(&mut once, CoreMode::Multi);
    let mut twice = once.clone();
    stepper.reset_for_run(&mut twice, CoreMode::Multi);
    assert_eq!(once, twice);
}

/// Tests the structural hazard rule on pre-step stage values.
#[rstest]
#[case(None, -1, true)]
#[case(None, 2, true)]
#[case(Some(0), -1, true)]
#[case(Some(-1), -1, false)]
#[case(Some(2), 2, false)]
#[case(Some(1), 2, false)]
#[case(Some(4), 3, true)]
fn test_may_advance(#[case] ahead: Option<i8>, #[case] current: i8, #[case] expected: bool) {
    assert_eq!(may_advance(ahead, current), expected);
}

/// Tests that only the lane head enters Fetch on the first cycle.
#[test]
fn test_first_cycle_only_head_enters() {
    let stepper = PipelineStepper::default();
    let mut insts = instructions(3);
    stepper.reset_for_run(&mut insts, CoreMode::Single);

    let outcome = stepper.step(&mut insts, CoreMode::Single, 0);

    assert_eq!(insts[0].stage(), Some(Stage::Fetch));
    assert_eq!(insts[1].current_stage(), -1);
    assert_eq!(insts[2].current_stage(), -1);
    assert_eq!(outcome.advanced, 1);
    assert_eq!(outcome.stalled, 2);
    assert_eq!(outcome.retired, 0);
}

/// Tests the stage-by-stage progression of a three-instruction lane.
#[test]
fn test_single_core_progression_table() {
    let stepper = PipelineStepper::default();
    let mut insts = instructions(3);
    stepper.reset_for_run(&mut insts, CoreMode::Single);

    let expected: [[i8; 3]; 7] = [
        [0, -1, -1],
        [1, 0, -1],
        [2, 1, 0],
        [3, 2, 1],
        [4, 3, 2],
        [4, 4, 3],
        [4, 4, 4],
    ];
    for (cycle, row) in expected.iter().enumerate() {
        stepper.step(&mut insts, CoreMode::Single, cycle as u64);
        let stages: Vec<i8> = insts.iter().map(Instruction::current_stage).collect();
        assert_eq!(stages, row.to_vec(), "cycle {}", cycle);
    }
    assert!(PipelineStepper::is_run_complete(&insts));
}

/// Tests three single-core instructions retiring on consecutive cycles, finishing on cycle 6.
#[test]
fn test_three_instructions_single_core() {
    let stepper = PipelineStepper::default();
    let mut insts = instructions(3);
    let retired = retirement_cycles(&stepper, &mut insts, CoreMode::Single);
    assert_eq!(retired, vec![4, 5, 6]);
}

/// Tests eight instructions over four cores: every lane finishes on cycle 5.
#[test]
fn test_eight_instructions_multi_core() {
    let stepper = PipelineStepper::default();
    let mut insts = instructions(8);
    let retired = retirement_cycles(&stepper, &mut insts, CoreMode::Multi);
    assert_eq!(retired, vec![4, 4, 4, 4, 5, 5, 5, 5]);
    assert_eq!(retired.iter().max(), Some(&5));
}

/// Tests the fill/drain bound for single-core and multi-core runs.
#[rstest]
#[case(1, CoreMode::Single, 4)]
#[case(5, CoreMode::Single, 8)]
#[case(20, CoreMode::Single, 23)]
#[case(1, CoreMode::Multi, 4)]
#[case(5, CoreMode::Multi, 5)]
#[case(20, CoreMode::Multi, 8)]
fn test_completion_cycle(#[case] n: u32, #[case] mode: CoreMode, #[case] last: u64) {
    let stepper = PipelineStepper::default();
    let mut insts = instructions(n);
    let retired = retirement_cycles(&stepper, &mut insts, mode);
    assert_eq!(retired.into_iter().max(), Some(last));
}

/// Tests that completed instructions are frozen.
#[test]
fn test_completed_instructions_do_not_move() {
    let stepper = PipelineStepper::default();
    let mut insts = instructions(1);
    stepper.reset_for_run(&mut insts, CoreMode::Single);
    for cycle in 0..5 {
        stepper.step(&mut insts, CoreMode::Single, cycle);
    }
    assert_eq!(insts[0].state(), InstructionState::Completed);

    let outcome = stepper.step(&mut insts, CoreMode::Single, 5);
    assert_eq!(insts[0].current_stage(), 4);
    assert_eq!(outcome.advanced, 0);
    assert_eq!(outcome.stalled, 0);
}

/// Tests that an empty instruction set is trivially complete.
#[test]
fn test_empty_run_is_complete() {
    let stepper = PipelineStepper::default();
    let mut insts: Vec<Instruction> = Vec::new();
    stepper.reset_for_run(&mut insts, CoreMode::Multi);
    let outcome = stepper.step(&mut insts, CoreMode::Multi, 0);
    assert_eq!(outcome.advanced, 0);
    assert!(PipelineStepper::is_run_complete(&insts));
}

/// Tests lane partitioning by assigned core, preserving list order.
#[test]
fn test_partition_lanes() {
    let stepper = PipelineStepper::new(3);
    let mut insts = instructions(7);
    stepper.reset_for_run(&mut insts, CoreMode::Multi);

    let lanes = partition_lanes(&insts, CoreMode::Multi, 3);
    assert_eq!(lanes, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);

    let single = partition_lanes(&insts, CoreMode::Single, 3);
    assert_eq!(single, vec![(0..7).collect::<Vec<_>>()]);
}

/// Tests that a configurable core count changes the lane layout.
#[test]
fn test_two_core_stepper() {
    let stepper = PipelineStepper::new(2);
    let mut insts = instructions(4);
    let retired = retirement_cycles(&stepper, &mut insts, CoreMode::Multi);
    assert_eq!(retired, vec![4, 4, 5, 5]);
}

/// Tests instruction naming and stage lookup helpers.
#[test]
fn test_instruction_helpers() {
    let stepper = PipelineStepper::default();
    let mut insts = vec![Instruction::new(7)];
    assert_eq!(insts[0].id(), 7);
    assert_eq!(insts[0].name(), "INST7");
    assert_eq!(insts[0].stage(), None);

    stepper.reset_for_run(&mut insts, CoreMode::Single);
    for cycle in 0..4 {
        stepper.step(&mut insts, CoreMode::Single, cycle);
    }
    assert_eq!(insts[0].stage(), Some(Stage::WriteBack));
    assert_eq!(insts[0].state(), InstructionState::InStage(Stage::WriteBack));
    assert_eq!(Stage::WriteBack.to_string(), "Write Back");
    assert_eq!(Stage::from_index(4), None);
}
