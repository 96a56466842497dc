//! Core Mode Selection.
//!
//! This module defines how instructions are spread over processing lanes.
//! The same mode value selects the pipeline layout, the renderer layout and
//! the wording of the run summary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SimError;

/// Lane count used in multi-core mode unless configured otherwise.
pub const DEFAULT_CORES: usize = 4;

/// Processor layout the simulation runs under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreMode {
    /// One shared pipeline; instructions form a single ordered lane.
    #[default]
    Single,

    /// Independent pipelines, one per core.
    ///
    /// Instructions are assigned to cores round-robin by list position
    /// when a run starts and never migrate.
    Multi,
}

impl CoreMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            CoreMode::Single => CoreMode::Multi,
            CoreMode::Multi => CoreMode::Single,
        }
    }

    /// Returns the lowercase name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            CoreMode::Single => "single",
            CoreMode::Multi => "multi",
        }
    }
}

impl fmt::Display for CoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreMode::Single => f.write_str("single-core"),
            CoreMode::Multi => f.write_str("multi-core"),
        }
    }
}

impl FromStr for CoreMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "single-core" | "1" => Ok(CoreMode::Single),
            "multi" | "multi-core" => Ok(CoreMode::Multi),
            other => Err(SimError::UnknownOption {
                kind: "core mode",
                value: other.to_string(),
            }),
        }
    }
}
