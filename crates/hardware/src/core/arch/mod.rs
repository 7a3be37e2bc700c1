//! Architectural state.
//!
//! Holds the programmer-visible state that survives pipeline flushes:
//! 1. **GPRs:** The general-purpose register file.

/// General-Purpose Register file implementation.
pub mod gpr;

pub use gpr::Gpr;
