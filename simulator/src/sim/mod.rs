//! Simulation harness.
//!
//! Handles driving runs at a fixed cadence and presenting their state.

/// Text and JSON renderers for pipeline runs.
pub mod render;

/// Fixed-cadence clock with cycle cap and cancellation.
pub mod ticker;

pub use ticker::{CancelToken, RunSummary, StopReason, TickResult, Ticker};
