//! Five-stage pipeline simulator library.
//!
//! This crate implements a cycle-accurate, in-order RISC-V pipeline model with the following:
//! 1. **Core:** Fetch, decode, execute, memory and writeback stages joined by latches,
//!    with a hazard-tracking register file and operand forwarding.
//! 2. **Units:** A variable-latency functional unit, a branch predictor with a BTB,
//!    and a blocking set-associative data cache.
//! 3. **Memory:** A latency-bearing backing store with a reserved code segment.
//! 4. **ISA:** A reduced RV64I/M instruction set with an assembly loader and disassembler.
//! 5. **Simulation:** Configuration, initial state files, statistics and reports.

/// Common types and constants (errors, word size, register count).
pub mod common;
/// Simulator configuration (defaults, policy enums, hierarchical config structures).
pub mod config;
/// CPU core (pipeline controller, stages, register file, units).
pub mod core;
/// Instruction set (opcodes, instruction record, instruction store, disassembly).
pub mod isa;
/// Program loader, initial state and the top-level simulator.
pub mod sim;
/// System components (backing store).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Pipeline controller; holds every latch, unit and statistic.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// End-of-run statistics and final state.
pub use crate::stats::Report;
