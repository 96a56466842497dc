//! Static core-count benchmark table.
//!
//! Relative performance (percent of the 8-core result) for three workload types,
//! plus the canned analysis shown alongside the chart. The numbers are fixed
//! teaching values, not measurements.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::SimError;

/// Core counts covered by the table, in column order.
pub const CORE_COUNTS: [u32; 5] = [1, 2, 4, 6, 8];

/// Workload categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Workload {
    #[default]
    Gaming,
    VideoEditing,
    WebBrowsing,
}

impl Workload {
    pub const ALL: [Workload; 3] = [
        Workload::Gaming,
        Workload::VideoEditing,
        Workload::WebBrowsing,
    ];

    /// Identifier used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Workload::Gaming => "gaming",
            Workload::VideoEditing => "video-editing",
            Workload::WebBrowsing => "web-browsing",
        }
    }

    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            Workload::Gaming => "Gaming",
            Workload::VideoEditing => "Video Editing",
            Workload::WebBrowsing => "Web Browsing",
        }
    }

    /// Scores for [`CORE_COUNTS`], in the same order.
    pub fn scores(self) -> [u32; 5] {
        match self {
            Workload::Gaming => [45, 65, 85, 95, 100],
            Workload::VideoEditing => [20, 40, 70, 90, 100],
            Workload::WebBrowsing => [60, 80, 95, 98, 100],
        }
    }

    /// Score for a core count, or `None` if the table has no such column.
    pub fn performance(self, cores: u32) -> Option<u32> {
        CORE_COUNTS
            .iter()
            .position(|&c| c == cores)
            .map(|column| self.scores()[column])
    }

    fn labels(self) -> [&'static str; 5] {
        match self {
            Workload::Gaming => ["Minimal", "Basic", "Good", "Optimal", "High-End"],
            Workload::VideoEditing => ["Very Slow", "Basic", "Standard", "Fast", "Professional"],
            Workload::WebBrowsing => ["Limited", "Adequate", "Optimal", "Excessive", "Overkill"],
        }
    }

    /// Core count that gives the best value for money for this workload.
    fn best_value_cores(self) -> u32 {
        match self {
            Workload::Gaming => 6,
            Workload::WebBrowsing => 4,
            Workload::VideoEditing => 8,
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Workload {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "gaming" => Ok(Workload::Gaming),
            "video-editing" | "video" => Ok(Workload::VideoEditing),
            "web-browsing" | "web" | "browsing" => Ok(Workload::WebBrowsing),
            other => Err(SimError::UnknownOption {
                kind: "workload",
                value: other.to_string(),
            }),
        }
    }
}

/// One bar of the chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BenchmarkPoint {
    pub cores: u32,
    pub performance: u32,
    pub label: &'static str,
    pub best_value: bool,
}

impl BenchmarkPoint {
    /// Column heading, e.g. `1 Core`, `4 Cores`.
    pub fn cores_label(&self) -> String {
        if self.cores == 1 {
            "1 Core".to_string()
        } else {
            format!("{} Cores", self.cores)
        }
    }
}

/// The recommended core count and how it compares with the extremes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BestValue {
    pub cores: u32,
    pub performance: u32,
    /// Gain over the 1-core score, in percentage points.
    pub vs_single: i32,
    /// Difference from the 8-core score, in percentage points (zero or negative).
    pub vs_max: i32,
}

/// Canned buying advice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub badge: &'static str,
    pub analysis: &'static str,
    pub specific: &'static str,
    pub details: &'static str,
    pub examples: &'static str,
}

/// Everything the results view shows for one workload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub workload: Workload,
    pub points: Vec<BenchmarkPoint>,
    pub best_value: BestValue,
    pub best_performing: (u32, u32),
    pub scaling_factor: f64,
    pub advice: Advice,
    pub headline: &'static str,
    pub insight: String,
    pub conclusion: &'static str,
}

/// Chart rows for a workload.
pub fn results(workload: Workload) -> Vec<BenchmarkPoint> {
    let best = workload.best_value_cores();
    CORE_COUNTS
        .iter()
        .zip(workload.scores())
        .zip(workload.labels())
        .map(|((&cores, performance), label)| BenchmarkPoint {
            cores,
            performance,
            label,
            best_value: cores == best,
        })
        .collect()
}

/// Best-value core count for a workload.
pub fn best_value(workload: Workload) -> BestValue {
    let scores = workload.scores();
    let single = scores[0] as i32;
    let max = scores[scores.len() - 1] as i32;
    let cores = workload.best_value_cores();
    let performance = workload.performance(cores).unwrap_or_default();
    BestValue {
        cores,
        performance,
        vs_single: performance as i32 - single,
        vs_max: performance as i32 - max,
    }
}

/// Core count with the highest score; the first one wins a tie.
pub fn best_performing(workload: Workload) -> (u32, u32) {
    let mut best = (0, 0);
    for (&cores, performance) in CORE_COUNTS.iter().zip(workload.scores()) {
        if performance > best.1 {
            best = (cores, performance);
        }
    }
    best
}

/// Ratio of the 8-core score to the 1-core score, rounded to one decimal.
pub fn scaling_factor(workload: Workload) -> f64 {
    let scores = workload.scores();
    let ratio = scores[4] as f64 / scores[0] as f64;
    (ratio * 10.0).round() / 10.0
}

/// Buying advice for a workload.
pub fn advice(workload: Workload) -> Advice {
    match workload {
        Workload::Gaming => Advice {
            badge: "Sweet Spot",
            analysis: "Modern games lean on single-core performance. Six cores deliver 95% of \
                       eight-core performance at a much better price, so budget is better spent on the GPU.",
            specific: "6 Core - Ryzen 5 / Core i5",
            details: "Prioritise a CPU with high clock speed and good IPC",
            examples: "Ryzen 5 7600X, Core i5-13600K, Ryzen 5 5600X",
        },
        Workload::VideoEditing => Advice {
            badge: "Recommended",
            analysis: "Video rendering scales very well with extra cores. Every additional core \
                       noticeably speeds up encoding and rendering. Eight cores is the starting point \
                       for professional editing.",
            specific: "8+ Core - Ryzen 7 / Core i7",
            details: "Extra cores pay for themselves in productivity",
            examples: "Ryzen 7 7700X, Core i7-13700K, Ryzen 9 7900X",
        },
        Workload::WebBrowsing => Advice {
            badge: "Optimal",
            analysis: "Browsers and office applications do not use many cores. Four modern cores \
                       already give smooth everyday multitasking; more cores give diminishing returns.",
            specific: "4 Core - Ryzen 3 / Core i3",
            details: "No need to overspend on extra cores",
            examples: "Ryzen 3 5300G, Core i3-13100, Ryzen 5 5600G",
        },
    }
}

/// One-line verdict shown when a benchmark run finishes.
pub fn headline(workload: Workload) -> &'static str {
    match workload {
        Workload::Gaming => "Gaming: single-core performance matters more!",
        Workload::VideoEditing => "Video Editing: multi-core gives a significant performance boost!",
        Workload::WebBrowsing => "Web Browsing: 2-4 cores are already optimal for browsing!",
    }
}

/// Observation derived from the table.
pub fn insight(workload: Workload) -> String {
    let scores = workload.scores();
    match workload {
        Workload::Gaming => format!(
            "Gaming performance rises {}% from 1 core to 8 cores. Single-core performance still dominates.",
            scores[4] - scores[0]
        ),
        Workload::VideoEditing => format!(
            "Excellent scaling! Multi-core gives a {}% boost for video rendering.",
            scores[4] - scores[0]
        ),
        Workload::WebBrowsing => format!(
            "Performance peaks at 4 cores with {}%. Extra cores give diminishing returns.",
            scores[2]
        ),
    }
}

/// Closing recommendation.
pub fn conclusion(workload: Workload) -> &'static str {
    match workload {
        Workload::Gaming => {
            "Prioritise a CPU with high clock speed. 6-8 cores is the sweet spot for modern gaming."
        }
        Workload::VideoEditing => {
            "A multi-core CPU is well worth it. 8+ cores will save significant rendering time."
        }
        Workload::WebBrowsing => {
            "A 4-core CPU offers the best value. No need to overspend on extra cores."
        }
    }
}

/// Builds the full results view for a workload.
pub fn report(workload: Workload) -> BenchmarkReport {
    BenchmarkReport {
        workload,
        points: results(workload),
        best_value: best_value(workload),
        best_performing: best_performing(workload),
        scaling_factor: scaling_factor(workload),
        advice: advice(workload),
        headline: headline(workload),
        insight: insight(workload),
        conclusion: conclusion(workload),
    }
}
