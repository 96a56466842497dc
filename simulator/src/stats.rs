//! Simulation statistics collection and reporting.
//!
//! Tracks per-run counters for the pipeline simulation: cycles, retirements,
//! stage advances, hazard stalls and per-lane throughput.

use std::time::Instant;

use crate::core::pipeline::{Instruction, StepOutcome};

/// Pipeline run statistics.
///
/// Collects counters while a run is driven and prints a summary report once
/// it stops.
#[derive(Debug)]
pub struct RunStats {
    start_time: Instant,
    pub cycles: u64,
    pub instructions_total: u64,
    pub instructions_retired: u64,

    pub stage_advances: u64,
    pub stalls_structural: u64,

    pub lane_retired: Vec<u64>,
}

impl Default for RunStats {
    /// Returns the default value.
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl RunStats {
    /// Creates zeroed counters for a run over `total` instructions and `lanes` lanes.
    pub fn new(total: usize, lanes: usize) -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_total: total as u64,
            instructions_retired: 0,
            stage_advances: 0,
            stalls_structural: 0,
            lane_retired: vec![0; lanes.max(1)],
        }
    }

    /// Accumulates the movement of one cycle.
    pub fn record(&mut self, outcome: &StepOutcome) {
        self.cycles += 1;
        self.stage_advances += outcome.advanced as u64;
        self.stalls_structural += outcome.stalled as u64;
        self.instructions_retired += outcome.retired as u64;
    }

    /// Recomputes per-lane retirement counts from the final instruction set.
    pub fn tally_lanes(&mut self, instructions: &[Instruction]) {
        self.lane_retired.iter_mut().for_each(|count| *count = 0);
        let lanes = self.lane_retired.len();
        for instruction in instructions.iter().filter(|i| i.is_completed()) {
            let lane = instruction.core().unwrap_or(0) % lanes;
            self.lane_retired[lane] += 1;
        }
    }

    /// Retired instructions per executed cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        self.instructions_retired as f64 / self.cycles as f64
    }

    /// Prints a formatted summary of the run.
    ///
    /// Displays cycle and retirement counts, IPC, stall share and per-lane
    /// throughput in a human-readable format.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let total = if self.instructions_total == 0 {
            1
        } else {
            self.instructions_total
        };
        let slots = self.stage_advances + self.stalls_structural;
        let slots = if slots == 0 { 1 } else { slots };

        println!("\n==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_total);
        println!(
            "sim_retired              {} ({:.2}%)",
            self.instructions_retired,
            (self.instructions_retired as f64 / total as f64) * 100.0
        );
        println!("sim_ipc                  {:.4}", self.ipc());
        println!(
            "sim_cpi                  {:.4}",
            if self.instructions_retired == 0 {
                0.0
            } else {
                cyc as f64 / self.instructions_retired as f64
            }
        );
        println!("----------------------------------------------------------");
        println!("PIPELINE ACTIVITY");
        println!("  stage.advances         {}", self.stage_advances);
        println!(
            "  stalls.structural      {} ({:.2}%)",
            self.stalls_structural,
            (self.stalls_structural as f64 / slots as f64) * 100.0
        );
        println!("----------------------------------------------------------");
        println!("LANES");
        for (lane, retired) in self.lane_retired.iter().enumerate() {
            println!("  core{:<2} retired         {}", lane, retired);
        }
        println!("==========================================================");
    }
}
