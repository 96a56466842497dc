//! Common types used throughout the simulator.
//!
//! This module provides the core-mode selector and the crate-wide error type
//! shared by the pipeline, checkout, benchmark and quiz components.

/// Core mode selection (single-core or multi-core).
pub mod data;

/// Error types and advisory notices.
pub mod error;

pub use data::{CoreMode, DEFAULT_CORES};
pub use error::{SimError, SimResult};
