//! Functional Unit (ALU).
//!
//! This module implements the single integer functional unit of the Execute
//! stage. It computes register results, effective addresses, branch
//! outcomes and link values, and models per-opcode occupancy.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div, Divu, Rem, Remu
//! - [`logic`]:      And, Or, Xor
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical operations (and, or, xor).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use tracing::debug;

use crate::common::constants::LUI_SHIFT;
use crate::isa::instruction::Instruction;
use crate::isa::opcode::{OpType, Opcode};

/// Stateless integer operation dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// Register-register and register-immediate forms share an implementation;
    /// the caller passes the immediate as `b` for the latter.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::Alu;
    /// use pipesim_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(Opcode::Slli, 0x1, 4), 0x10);
    /// assert_eq!(Alu::execute(Opcode::Div, 9, 0), 9);
    /// assert_eq!(Alu::execute(Opcode::Xori, 0b1100, 0b1010), 0b0110);
    /// ```
    pub fn execute(op: Opcode, a: i64, b: i64) -> i64 {
        match op {
            Opcode::Add
            | Opcode::Addi
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Divu
            | Opcode::Rem
            | Opcode::Remu => arithmetic::execute(op, a, b),
            Opcode::And | Opcode::Andi | Opcode::Or | Opcode::Ori | Opcode::Xor | Opcode::Xori => {
                logic::execute(op, a, b)
            }
            Opcode::Sll | Opcode::Slli | Opcode::Sra | Opcode::Srai | Opcode::Srl | Opcode::Srli => {
                shifts::execute(op, a, b)
            }
            _ => 0,
        }
    }

    /// Evaluates a conditional branch predicate.
    pub const fn branch_taken(op: Opcode, a: i64, b: i64) -> bool {
        match op {
            Opcode::Beq => a == b,
            Opcode::Bne => a != b,
            Opcode::Blt => a < b,
            Opcode::Bge => a >= b,
            _ => false,
        }
    }
}

/// The pipeline's functional unit: holds at most one instruction for its
/// execution latency.
#[derive(Debug, Clone, Default)]
pub struct FunctionalUnit {
    running: Option<Instruction>,
    exit_tick: u64,
}

impl FunctionalUnit {
    /// Creates an idle functional unit.
    pub const fn new() -> Self {
        Self {
            running: None,
            exit_tick: 0,
        }
    }

    /// Returns `true` if no instruction occupies the unit.
    #[inline]
    pub const fn is_free(&self) -> bool {
        self.running.is_none()
    }

    /// Accepts an instruction at `tick` and computes its results.
    ///
    /// The instruction may leave at `tick + latency - 1`, so a one-cycle
    /// operation leaves in the same cycle it entered.
    pub fn run(&mut self, mut inst: Instruction, tick: u64) {
        self.exit_tick = tick + inst.latency.max(1) - 1;
        Self::compute(&mut inst);
        if arithmetic::divides_by_zero(inst.opcode, inst.rs2_val) {
            debug!(tick, pc = inst.pc, "alu: divide-by-zero, divisor replaced by 1");
        }
        self.running = Some(inst);
    }

    fn compute(inst: &mut Instruction) {
        let op = inst.opcode;
        match op {
            Opcode::Nop => {}
            Opcode::Ld | Opcode::Sd => {
                inst.memory_addr = inst.rs1_val.wrapping_add(inst.imm) as u64;
            }
            Opcode::Jal | Opcode::Jalr => inst.rd_val = inst.fall_through() as i64,
            Opcode::Lui => inst.rd_val = inst.imm << LUI_SHIFT,
            _ if op.is_branch() => {
                let taken = Alu::branch_taken(op, inst.rs1_val, inst.rs2_val);
                inst.branch_target = Some(if taken {
                    inst.relative_target()
                } else {
                    inst.fall_through()
                });
            }
            _ => {
                let b = match op.op_type() {
                    OpType::R => inst.rs2_val,
                    _ => inst.imm,
                };
                inst.rd_val = Alu::execute(op, inst.rs1_val, b);
            }
        }
    }

    /// Releases the held instruction once its exit tick is reached.
    ///
    /// With `forward` set, the result of a register-writing non-load is
    /// marked ready for forwarding. A load's value is only ready once the
    /// cache returns it.
    pub fn get_output(&mut self, tick: u64, forward: bool) -> Option<Instruction> {
        if tick < self.exit_tick {
            return None;
        }
        let mut inst = self.running.take()?;
        if forward && inst.writes_rd() && inst.opcode != Opcode::Ld {
            inst.rd_ready = true;
        }
        Some(inst)
    }

    /// Discards the held instruction.
    pub fn flush(&mut self) -> Option<Instruction> {
        self.running.take()
    }
}
