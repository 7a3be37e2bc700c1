//! Opcode definitions for the modeled instruction subset.
//!
//! Provides the opcode enumeration together with its per-opcode tables:
//! 1. **Mnemonics:** Assembly names used by the loader and disassembler.
//! 2. **Formats:** The encoding format (R/I/S/SB/U/UJ) that fixes operand layout.
//! 3. **Latencies:** Functional unit occupancy in cycles.

use std::fmt;

/// Instruction operations supported by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Opcode {
    /// No operation. Also occupies the reserved slot at PC 0.
    #[default]
    Nop,
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 & rs2`
    And,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Multiplication (low 64 bits).
    Mul,
    /// `rd = rs1 | rs2`
    Or,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
    /// Shift left logical.
    Sll,
    /// Shift right arithmetic.
    Sra,
    /// Shift right logical.
    Srl,
    /// `rd = rs1 - rs2`
    Sub,
    /// `rd = rs1 ^ rs2`
    Xor,
    /// `rd = rs1 + imm`
    Addi,
    /// `rd = rs1 & imm`
    Andi,
    /// Indirect jump and link, resolved in decode.
    Jalr,
    /// Shift left logical by immediate.
    Slli,
    /// Shift right arithmetic by immediate.
    Srai,
    /// Shift right logical by immediate.
    Srli,
    /// Load doubleword.
    Ld,
    /// `rd = rs1 | imm`
    Ori,
    /// `rd = rs1 ^ imm`
    Xori,
    /// Store doubleword.
    Sd,
    /// Branch if equal.
    Beq,
    /// Branch if greater than or equal (signed).
    Bge,
    /// Branch if less than (signed).
    Blt,
    /// Branch if not equal.
    Bne,
    /// Load upper immediate.
    Lui,
    /// Direct jump and link, resolved in decode.
    Jal,
}

/// Encoding format of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpType {
    /// No operands (`nop`).
    None,
    /// Register-register: `op rd, rs1, rs2`.
    R,
    /// Register-immediate: `op rd, rs1, imm`, or `op rd, imm(rs1)` for `ld`/`jalr`.
    I,
    /// Store: `op rs2, imm(rs1)`.
    S,
    /// Conditional branch: `op rs1, rs2, label`.
    Sb,
    /// Upper immediate: `op rd, imm`.
    U,
    /// Jump: `op rd, label`.
    Uj,
}

impl Opcode {
    /// Every opcode, in table order.
    pub const ALL: [Self; 30] = [
        Self::Nop,
        Self::Add,
        Self::And,
        Self::Div,
        Self::Divu,
        Self::Mul,
        Self::Or,
        Self::Rem,
        Self::Remu,
        Self::Sll,
        Self::Sra,
        Self::Srl,
        Self::Sub,
        Self::Xor,
        Self::Addi,
        Self::Andi,
        Self::Jalr,
        Self::Slli,
        Self::Srai,
        Self::Srli,
        Self::Ld,
        Self::Ori,
        Self::Xori,
        Self::Sd,
        Self::Beq,
        Self::Bge,
        Self::Blt,
        Self::Bne,
        Self::Lui,
        Self::Jal,
    ];

    /// Looks up an opcode by its lower-case mnemonic.
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.mnemonic() == s)
    }

    /// Returns the assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "nop",
            Self::Add => "add",
            Self::And => "and",
            Self::Div => "div",
            Self::Divu => "divu",
            Self::Mul => "mul",
            Self::Or => "or",
            Self::Rem => "rem",
            Self::Remu => "remu",
            Self::Sll => "sll",
            Self::Sra => "sra",
            Self::Srl => "srl",
            Self::Sub => "sub",
            Self::Xor => "xor",
            Self::Addi => "addi",
            Self::Andi => "andi",
            Self::Jalr => "jalr",
            Self::Slli => "slli",
            Self::Srai => "srai",
            Self::Srli => "srli",
            Self::Ld => "ld",
            Self::Ori => "ori",
            Self::Xori => "xori",
            Self::Sd => "sd",
            Self::Beq => "beq",
            Self::Bge => "bge",
            Self::Blt => "blt",
            Self::Bne => "bne",
            Self::Lui => "lui",
            Self::Jal => "jal",
        }
    }

    /// Returns the encoding format.
    pub const fn op_type(self) -> OpType {
        match self {
            Self::Nop => OpType::None,
            Self::Add
            | Self::And
            | Self::Div
            | Self::Divu
            | Self::Mul
            | Self::Or
            | Self::Rem
            | Self::Remu
            | Self::Sll
            | Self::Sra
            | Self::Srl
            | Self::Sub
            | Self::Xor => OpType::R,
            Self::Addi
            | Self::Andi
            | Self::Jalr
            | Self::Slli
            | Self::Srai
            | Self::Srli
            | Self::Ld
            | Self::Ori
            | Self::Xori => OpType::I,
            Self::Sd => OpType::S,
            Self::Beq | Self::Bge | Self::Blt | Self::Bne => OpType::Sb,
            Self::Lui => OpType::U,
            Self::Jal => OpType::Uj,
        }
    }

    /// Returns the functional unit latency in cycles.
    ///
    /// Multiply, divide and remainder occupy the unit for two cycles; every
    /// other opcode completes in one.
    pub const fn latency(self) -> u64 {
        match self {
            Self::Mul | Self::Div | Self::Divu | Self::Rem | Self::Remu => 2,
            _ => 1,
        }
    }

    /// Returns `true` for conditional branches.
    #[inline]
    pub const fn is_branch(self) -> bool {
        matches!(self.op_type(), OpType::Sb)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
