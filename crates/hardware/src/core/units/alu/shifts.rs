//! ALU shift operations.
//!
//! The shift amount is taken from the low 6 bits of the second operand.

use crate::isa::opcode::Opcode;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - The shift opcode (register or immediate form).
/// * `a`  - Value to shift.
/// * `b`  - Shift amount.
///
/// # Returns
///
/// The shifted value, or `0` for non-shift opcodes.
pub const fn execute(op: Opcode, a: i64, b: i64) -> i64 {
    let shamt = (b & 0x3f) as u32;
    match op {
        Opcode::Sll | Opcode::Slli => a << shamt,
        Opcode::Sra | Opcode::Srai => a >> shamt,
        Opcode::Srl | Opcode::Srli => ((a as u64) >> shamt) as i64,
        _ => 0,
    }
}
