//! ALU arithmetic operations.
//!
//! Implements integer addition, subtraction, multiplication, division and
//! remainder on 64-bit operands. All operations wrap on overflow.
//!
//! Division and remainder by zero are not faults: the divisor is replaced
//! by 1, so `div` yields the dividend and `rem` yields 0.

use crate::isa::opcode::Opcode;

/// Returns `true` if `op` divides and the divisor is zero.
#[inline]
pub const fn divides_by_zero(op: Opcode, b: i64) -> bool {
    matches!(op, Opcode::Div | Opcode::Divu | Opcode::Rem | Opcode::Remu) && b == 0
}

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The operation (must be an arithmetic opcode).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 64-bit result. Returns `0` for non-arithmetic opcodes.
pub fn execute(op: Opcode, a: i64, b: i64) -> i64 {
    let divisor = if b == 0 { 1 } else { b };
    match op {
        Opcode::Add | Opcode::Addi => a.wrapping_add(b),
        Opcode::Sub => a.wrapping_sub(b),
        Opcode::Mul => a.wrapping_mul(b),
        Opcode::Div => a.wrapping_div(divisor),
        Opcode::Divu => ((a as u64) / (divisor as u64)) as i64,
        Opcode::Rem => a.wrapping_rem(divisor),
        Opcode::Remu => ((a as u64) % (divisor as u64)) as i64,
        _ => 0,
    }
}
