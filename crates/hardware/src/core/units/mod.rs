//! Execution units and functional components.
//!
//! This module contains the units the pipeline stages drive: the functional
//! unit (ALU), the branch prediction unit, and the data cache.

/// Functional unit for integer, address and branch computation.
pub mod alu;

/// Branch prediction unit: direction predictors and BTB.
pub mod bru;

/// Blocking set-associative data cache.
pub mod cache;
