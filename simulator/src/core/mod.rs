//! Pipeline simulation core.
//!
//! This module contains the four-stage pipeline model and the context object
//! that owns a simulation's mutable state between cycles.

/// Simulation context owned by the driving loop.
pub mod context;

/// Pipeline stages, instructions, hazard rule and stepper.
pub mod pipeline;

pub use context::SimContext;
