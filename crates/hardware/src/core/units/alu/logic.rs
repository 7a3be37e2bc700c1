//! ALU bitwise logical operations.

use crate::isa::opcode::Opcode;

/// Executes a bitwise logical operation.
///
/// Returns `0` for non-logical opcodes.
pub const fn execute(op: Opcode, a: i64, b: i64) -> i64 {
    match op {
        Opcode::And | Opcode::Andi => a & b,
        Opcode::Or | Opcode::Ori => a | b,
        Opcode::Xor | Opcode::Xori => a ^ b,
        _ => 0,
    }
}
