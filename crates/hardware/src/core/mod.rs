//! Core processor implementation.
//!
//! This module contains the pipeline controller, the five pipeline stages,
//! the execution units they drive, and the architectural register state.

/// Architectural state (general-purpose registers).
pub mod arch;

/// CPU core: pipeline controller and execution loop.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards).
pub mod pipeline;

/// Execution units (functional unit, branch predictor, data cache).
pub mod units;

pub use self::cpu::Cpu;
