//! The in-flight instruction record.
//!
//! An [`Instruction`] is created fresh each time fetch reads the instruction
//! store and is then moved, never copied, from latch to latch until it retires
//! at writeback or is dropped by a flush. The [`InstTag`] assigned at fetch is
//! the only handle other structures keep to it.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::isa::opcode::Opcode;

/// Unique sequence number of a fetched instruction.
///
/// Tags are allocated monotonically by the fetch stage, so two dynamic
/// instances of the same static instruction never share a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct InstTag(pub u64);

/// A decoded instruction together with its per-execution state.
///
/// Register index 0 denotes the hard-wired zero register, which is also used
/// to mean "no operand" for formats that lack a destination or source.
#[derive(Debug, Clone, Default)]
pub struct Instruction {
    /// Dynamic instance tag, assigned at fetch.
    pub tag: InstTag,
    /// Program counter of the instruction.
    pub pc: u64,
    /// Operation.
    pub opcode: Opcode,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Destination value (ALU result or loaded data).
    pub rd_val: i64,
    /// Resolved first operand value.
    pub rs1_val: i64,
    /// Resolved second operand value (store data for `sd`).
    pub rs2_val: i64,
    /// Immediate. For branches and `jal` this is the PC offset in half-words.
    pub imm: i64,
    /// Branch or jump label from the source text, kept for disassembly.
    pub label: Option<String>,
    /// Effective address of a load or store.
    pub memory_addr: u64,
    /// Functional unit occupancy in cycles.
    pub latency: u64,
    /// Whether `rd_val` may be forwarded to consumers.
    pub rd_ready: bool,
    /// Resolved next PC of a conditional branch (taken target or fall-through).
    pub branch_target: Option<u64>,
    /// Next PC fetch assumed for a conditional branch.
    pub pred_target: u64,
    /// Whether fetch predicted the branch taken.
    pub pred_taken: bool,
}

impl Instruction {
    /// Creates a static instruction with the latency of its opcode.
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            latency: opcode.latency(),
            ..Self::default()
        }
    }

    /// Returns the address of the sequentially next instruction.
    #[inline]
    pub const fn fall_through(&self) -> u64 {
        self.pc.wrapping_add(INSTRUCTION_SIZE)
    }

    /// Returns the PC-relative target encoded in `imm` (`pc + imm * 2`).
    #[inline]
    pub const fn relative_target(&self) -> u64 {
        self.pc.wrapping_add((self.imm << 1) as u64)
    }

    /// Returns `true` if the instruction writes an architectural register.
    #[inline]
    pub const fn writes_rd(&self) -> bool {
        self.rd != 0
    }
}
