//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Instruction width, word size, register count and encoding widths.
//! 2. **Error Handling:** Fatal simulator errors and program/state load errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use constants::{INSTRUCTION_SIZE, NUM_REGS, WORD_BYTES};
pub use error::{LoadError, Result, SimError};
