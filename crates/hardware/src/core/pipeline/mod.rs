//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Hazards:** The register file with last-writer tracking and forwarding.
//! 2. **Latches:** Single-entry buffers between adjacent stages.
//! 3. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.

/// Hazard-tracking register file.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;
