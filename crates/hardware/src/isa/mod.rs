//! Instruction Set Architecture (ISA) model.
//!
//! Defines the modeled instruction subset and how instructions are stored:
//!
//! * `opcode`: Opcodes, encoding formats and functional unit latencies.
//! * `instruction`: The in-flight instruction record and its fetch tag.
//! * `disasm`: Assembly-syntax rendering for traces and diagnostics.
//! * `program`: The instruction source read by the fetch stage.

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// In-flight instruction record.
pub mod instruction;

/// Opcode table.
pub mod opcode;

/// Instruction store.
pub mod program;

pub use instruction::{InstTag, Instruction};
pub use opcode::{OpType, Opcode};
pub use program::{InstructionMemory, InstructionSource};
