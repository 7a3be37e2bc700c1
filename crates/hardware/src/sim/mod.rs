//! Simulation front-end.
//!
//! Parses programs and initial-state files and wraps the CPU in a
//! [`Simulator`] that runs it to completion.

/// Assembly program parser.
pub mod loader;

/// Register and memory initial-state files.
pub mod state;

/// Top-level simulator.
pub mod simulator;

pub use simulator::Simulator;
