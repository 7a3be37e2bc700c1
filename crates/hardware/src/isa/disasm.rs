//! Instruction disassembler.
//!
//! Renders an [`Instruction`] back into the assembly syntax accepted by the
//! program loader, for trace logging and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use pipesim_core::isa::{Instruction, Opcode};
//!
//! let mut inst = Instruction::new(Opcode::Ld);
//! inst.rd = 1;
//! inst.rs1 = 2;
//! inst.imm = 8;
//! assert_eq!(inst.to_string(), "ld x1, 8(x2)");
//! ```

use std::fmt;

use crate::isa::instruction::Instruction;
use crate::isa::opcode::{OpType, Opcode};

/// Formats an instruction in assembly syntax.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode;
        match op.op_type() {
            OpType::None => write!(f, "{op}"),
            OpType::R => write!(f, "{op} x{}, x{}, x{}", self.rd, self.rs1, self.rs2),
            OpType::I if matches!(op, Opcode::Ld | Opcode::Jalr) => {
                write!(f, "{op} x{}, {}(x{})", self.rd, self.imm, self.rs1)
            }
            OpType::I => write!(f, "{op} x{}, x{}, {}", self.rd, self.rs1, self.imm),
            OpType::S => write!(f, "{op} x{}, {}(x{})", self.rs2, self.imm, self.rs1),
            OpType::Sb => {
                write!(f, "{op} x{}, x{}, {}", self.rs1, self.rs2, self.imm)?;
                write_label(f, self.label.as_deref())
            }
            OpType::U => write!(f, "{op} x{}, {}", self.rd, self.imm),
            OpType::Uj => {
                write!(f, "{op} x{}, {}", self.rd, self.imm)?;
                write_label(f, self.label.as_deref())
            }
        }
    }
}

fn write_label(f: &mut fmt::Formatter<'_>, label: Option<&str>) -> fmt::Result {
    match label {
        Some(label) => write!(f, " ({label})"),
        None => Ok(()),
    }
}

/// Detailed rendering with PC and resolved operand values.
///
/// Produced by [`Instruction::detailed`]; used by the per-stage trace.
#[derive(Debug, Clone, Copy)]
pub struct Detailed<'a>(&'a Instruction);

impl Instruction {
    /// Returns a formatter that prints the PC, the assembly text and the
    /// operand values currently carried by the instruction.
    pub const fn detailed(&self) -> Detailed<'_> {
        Detailed(self)
    }
}

impl fmt::Display for Detailed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inst = self.0;
        let op = inst.opcode;
        write!(f, "[pc={}] {inst}", inst.pc)?;
        match op.op_type() {
            OpType::None => Ok(()),
            OpType::R => write!(
                f,
                " [{op} {}, {}, {}]",
                inst.rd_val, inst.rs1_val, inst.rs2_val
            ),
            OpType::I if matches!(op, Opcode::Ld | Opcode::Jalr) => {
                write!(f, " [{op} {}, {}({})]", inst.rd_val, inst.imm, inst.rs1_val)
            }
            OpType::I => write!(f, " [{op} {}, {}, {}]", inst.rd_val, inst.rs1_val, inst.imm),
            OpType::S => write!(f, " [{op} {}, {}({})]", inst.rs2_val, inst.imm, inst.rs1_val),
            OpType::Sb => write!(
                f,
                " [{op} {}, {}, {}]",
                inst.rs1_val, inst.rs2_val, inst.imm
            ),
            OpType::U | OpType::Uj => write!(f, " [{op} {}, {}]", inst.rd_val, inst.imm),
        }
    }
}
