//! Error and Notice definitions.
//!
//! This module defines the single error type shared by every simulation in the crate.
//! It covers two families of conditions:
//! 1. **Notices:** Guard conditions raised by the driving layer (a run is already active,
//!    nothing has been queued, a quiz is unanswered). These are advisory and carry no
//!    recovery logic.
//! 2. **Faults:** Configuration, parsing and output failures that abort the command.
//!
//! The pipeline stepper itself never fails.

use std::io;

use thiserror::Error;

/// Errors and advisory notices produced by the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// A run is active; instructions, customers or the core mode cannot change.
    #[error("a simulation run is already in progress, wait for it to finish")]
    RunInProgress,

    /// The pipeline was started with an empty instruction set.
    #[error("no instructions queued, add an instruction first")]
    NoInstructions,

    /// The checkout simulation was started with empty queues.
    #[error("no customers queued, add a customer first")]
    NoCustomers,

    /// A quiz question was left unanswered. The associated value names it.
    #[error("answer every quiz question first (missing: {0})")]
    IncompleteQuiz(&'static str),

    /// A textual option did not match any known value.
    #[error("unknown {kind} '{value}'")]
    UnknownOption {
        /// What was being parsed (for example `core mode`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::Config`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A JSON event could not be encoded.
    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing rendered output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SimError {
    /// Returns `true` for advisory guard conditions that are not faults.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            SimError::RunInProgress
                | SimError::NoInstructions
                | SimError::NoCustomers
                | SimError::IncompleteQuiz(_)
        )
    }
}

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;
