//! Tests for the text and JSON renderers.

use std::time::Duration;

use cpu_compare::common::CoreMode;
use cpu_compare::core::pipeline::{Instruction, PipelineObserver, PipelineStepper};
use cpu_compare::core::SimContext;
use cpu_compare::sim::render::{format_lane, JsonRenderer, TextRenderer};
use cpu_compare::sim::Ticker;
use pretty_assertions::assert_eq;
use serde_json::Value;

fn run_with<O: PipelineObserver>(n: usize, mode: CoreMode, observer: &mut O) {
    let mut ctx = SimContext::new(mode, PipelineStepper::default());
    ctx.add_instructions(n).expect("context is idle");
    Ticker::new(Duration::ZERO, Some(20))
        .run_pipeline(&mut ctx, observer)
        .expect("run succeeds");
}

/// Tests the stage occupancy string for a lane.
#[test]
fn test_format_lane() {
    let stepper = PipelineStepper::default();
    let mut insts: Vec<Instruction> = (1..=3).map(Instruction::new).collect();
    stepper.reset_for_run(&mut insts, CoreMode::Single);
    for cycle in 0..3 {
        stepper.step(&mut insts, CoreMode::Single, cycle);
    }

    assert_eq!(
        format_lane(&insts, &[0, 1, 2]),
        "Fetch: INST3 | Decode: INST2 | Execute: INST1 | Write Back: -"
    );
    assert_eq!(
        format_lane(&insts, &[0, 1]),
        "Fetch: - | Decode: INST2 | Execute: INST1 | Write Back: -"
    );
}

/// Tests the single-core text output of a one-instruction run.
#[test]
fn test_text_single_core() {
    let mut renderer = TextRenderer::new(Vec::new(), 4);
    run_with(1, CoreMode::Single, &mut renderer);
    let text = String::from_utf8(renderer.into_inner()).expect("utf-8 output");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "[*] single-core pipeline, 1 instructions");
    assert_eq!(
        lines[1],
        "cycle   0 | cpu    | Fetch: INST1 | Decode: - | Execute: - | Write Back: - | done: 0"
    );
    assert_eq!(
        lines[5],
        "cycle   4 | cpu    | Fetch: - | Decode: - | Execute: - | Write Back: - | done: 1"
    );
    assert_eq!(
        lines[6],
        "[*] All 1 instructions completed in 5 cycles! \
         Single-core processes instructions one after another."
    );
    assert_eq!(lines.len(), 7);
}

/// Tests that multi-core output prints one row per core per cycle.
#[test]
fn test_text_multi_core_rows() {
    let mut renderer = TextRenderer::new(Vec::new(), 4);
    run_with(5, CoreMode::Multi, &mut renderer);
    let text = String::from_utf8(renderer.into_inner()).expect("utf-8 output");

    let first_cycle: Vec<&str> = text.lines().filter(|l| l.starts_with("cycle   0 |")).collect();
    assert_eq!(first_cycle.len(), 4);
    assert!(first_cycle[0].contains("| core0  | Fetch: INST1 |"));
    assert!(first_cycle[3].contains("| core3  | Fetch: INST4 |"));
    assert!(text.contains("All 5 instructions completed in 6 cycles!"));
}

/// Tests the JSON lines stream.
#[test]
fn test_json_events() {
    let mut renderer = JsonRenderer::new(Vec::new());
    run_with(2, CoreMode::Multi, &mut renderer);
    let text = String::from_utf8(renderer.into_inner()).expect("utf-8 output");

    let events: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();

    // reset, cycles 0..=4, finish
    assert_eq!(events.len(), 7);
    assert_eq!(events[0]["event"], "reset");
    assert_eq!(events[0]["mode"], "multi");
    assert_eq!(events[0]["instructions"][1]["current_stage"], -1);
    assert_eq!(events[0]["instructions"][1]["core"], 1);

    assert_eq!(events[1]["event"], "cycle");
    assert_eq!(events[1]["cycle"], 0);
    assert_eq!(events[1]["instructions"][0]["current_stage"], 0);

    let finish = &events[6];
    assert_eq!(finish["event"], "finish");
    assert_eq!(finish["summary"]["cycles"], 5);
    assert_eq!(finish["summary"]["last_cycle"], 4);
    assert_eq!(finish["summary"]["completed"], 2);
    assert_eq!(finish["summary"]["stop"], "completed");
    assert_eq!(
        finish["message"],
        "All 2 instructions completed in 5 cycles! Multi-core processes instructions in parallel!"
    );
}
