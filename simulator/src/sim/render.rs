//! Text and JSON renderers.
//!
//! Renderers are [`PipelineObserver`]s: they read the instruction set after each
//! cycle and write a view of it. Nothing here mutates simulation state.

use std::io::{self, Write};

use serde::Serialize;

use crate::benchmark::BenchmarkPoint;
use crate::common::CoreMode;
use crate::core::pipeline::hazards::partition_lanes;
use crate::core::pipeline::{Instruction, PipelineObserver, Stage};
use crate::sim::ticker::RunSummary;

/// Writes one line per lane per cycle, listing the occupant of each stage.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    cores: usize,
}

impl<W: Write> TextRenderer<W> {
    /// Creates a renderer; `cores` must match the stepper's lane count.
    pub fn new(out: W, cores: usize) -> Self {
        Self {
            out,
            cores: cores.max(1),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Formats the stage occupancy of one lane, e.g. `Fetch: INST2 | Decode: INST1 | ...`.
pub fn format_lane(instructions: &[Instruction], lane: &[usize]) -> String {
    Stage::ALL
        .iter()
        .map(|&stage| {
            let occupants: Vec<String> = lane
                .iter()
                .map(|&position| &instructions[position])
                .filter(|instruction| instruction.stage() == Some(stage))
                .map(Instruction::name)
                .collect();
            let slot = if occupants.is_empty() {
                "-".to_string()
            } else {
                occupants.join(",")
            };
            format!("{}: {}", stage, slot)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

impl<W: Write> PipelineObserver for TextRenderer<W> {
    fn on_reset(&mut self, instructions: &[Instruction], mode: CoreMode) -> io::Result<()> {
        writeln!(
            self.out,
            "[*] {} pipeline, {} instructions",
            mode,
            instructions.len()
        )
    }

    fn on_cycle(
        &mut self,
        cycle: u64,
        instructions: &[Instruction],
        mode: CoreMode,
    ) -> io::Result<()> {
        let done = instructions.iter().filter(|i| i.is_completed()).count();
        let lanes = partition_lanes(instructions, mode, self.cores);
        for (core, lane) in lanes.iter().enumerate() {
            let label = match mode {
                CoreMode::Single => "cpu".to_string(),
                CoreMode::Multi => format!("core{}", core),
            };
            writeln!(
                self.out,
                "cycle {:>3} | {:<6} | {} | done: {}",
                cycle,
                label,
                format_lane(instructions, lane),
                done
            )?;
        }
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out, "[*] {}", summary.message())?;
        self.out.flush()
    }
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
enum PipelineEvent<'a> {
    Reset {
        mode: CoreMode,
        instructions: &'a [Instruction],
    },
    Cycle {
        cycle: u64,
        mode: CoreMode,
        instructions: &'a [Instruction],
    },
    Finish {
        summary: &'a RunSummary,
        message: String,
    },
}

/// Writes one JSON object per event (JSON lines).
#[derive(Debug)]
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    /// Creates a renderer writing one event per line to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &PipelineEvent<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> PipelineObserver for JsonRenderer<W> {
    fn on_reset(&mut self, instructions: &[Instruction], mode: CoreMode) -> io::Result<()> {
        self.emit(&PipelineEvent::Reset { mode, instructions })
    }

    fn on_cycle(
        &mut self,
        cycle: u64,
        instructions: &[Instruction],
        mode: CoreMode,
    ) -> io::Result<()> {
        self.emit(&PipelineEvent::Cycle {
            cycle,
            mode,
            instructions,
        })
    }

    fn on_finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.emit(&PipelineEvent::Finish {
            summary,
            message: summary.message(),
        })?;
        self.out.flush()
    }
}

/// Renders benchmark scores as a horizontal bar chart, one row per core count.
///
/// `width` is the bar length for a score of 100.
pub fn render_bar_chart(points: &[BenchmarkPoint], width: usize) -> String {
    let mut chart = String::new();
    for point in points {
        let filled = (point.performance as usize * width + 50) / 100;
        chart.push_str(&format!(
            "{:>8} | {:<bar$} {:>3}% {}\n",
            point.cores_label(),
            "#".repeat(filled),
            point.performance,
            point.label,
            bar = width
        ));
    }
    chart
}
