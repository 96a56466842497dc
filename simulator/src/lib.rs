//! Single-Core vs Multi-Core Teaching Simulator Library.
//!
//! This crate implements small, deterministic simulations that contrast a single
//! processor core with several cores. The centrepiece is a discrete-time instruction
//! pipeline; the rest are lookup tables and analogies used alongside it.
//!
//! # Architecture
//!
//! * **Pipeline**: 4-stage in-order pipeline (Fetch, Decode, Execute, Write Back),
//!   run as one lane or as one lane per core.
//! * **Driver**: fixed-cadence ticker with a cycle cap and cancellation; renderers
//!   observe the state after each cycle.
//! * **Extras**: checkout-queue analogy, static benchmark table, CPU buying quiz.
//!
//! # Modules
//!
//! * `benchmark`: Static benchmark table and derived analysis.
//! * `checkout`: Supermarket checkout analogy.
//! * `common`: Shared types and error handling.
//! * `config`: Configuration loading and parsing.
//! * `core`: Pipeline model and simulation context.
//! * `quiz`: Quiz answers to recommendation mapping.
//! * `sim`: Ticker and renderers.
//! * `stats`: Run statistics collection.

/// Static per-workload benchmark table, best-value analysis and advice text.
pub mod benchmark;

/// Supermarket checkout analogy comparing one cashier with a bank of cashiers.
pub mod checkout;

/// Shared types and error handling.
///
/// Provides the core-mode selector and the crate-wide error type used by
/// every simulation.
pub mod common;

/// Configuration system for timing, pipeline and checkout settings.
///
/// Loads and validates TOML configuration files; every value has a default.
pub mod config;

/// Pipeline model, hazard rule, stepper and simulation context.
pub mod core;

/// CPU buying quiz.
pub mod quiz;

/// Simulation harness: fixed-cadence ticker and renderers.
pub mod sim;

/// Pipeline run statistics collection and reporting.
pub mod stats;
