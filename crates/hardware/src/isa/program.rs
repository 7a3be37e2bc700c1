//! Instruction store.
//!
//! The pipeline reads instructions through [`InstructionSource`], which hands
//! out a fresh copy of the static instruction at a byte address. The flat
//! [`InstructionMemory`] table reserves slot 0 so that PC 0 never names a
//! valid instruction.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::isa::instruction::Instruction;

/// A read-only source of static instructions indexed by PC.
pub trait InstructionSource {
    /// Returns a fresh copy of the instruction at `pc`.
    ///
    /// Returns `None` for PC 0 and for any address past the end of the program.
    fn read(&self, pc: u64) -> Option<Instruction>;

    /// Returns the number of table slots, including the reserved slot 0.
    fn instruction_count(&self) -> usize;
}

/// Flat instruction table; the instruction at PC `4 * i` is slot `i`.
#[derive(Debug, Clone)]
pub struct InstructionMemory {
    slots: Vec<Instruction>,
}

impl InstructionMemory {
    /// Creates a table holding `program`, starting at PC 4.
    ///
    /// Each instruction's `pc` field is rewritten to its slot address.
    pub fn new(program: impl IntoIterator<Item = Instruction>) -> Self {
        let mut slots = vec![Instruction::default()];
        slots.extend(program);
        for (i, inst) in slots.iter_mut().enumerate() {
            inst.pc = i as u64 * INSTRUCTION_SIZE;
        }
        Self { slots }
    }

    /// Returns the static instructions, excluding the reserved slot.
    pub fn instructions(&self) -> &[Instruction] {
        &self.slots[1..]
    }
}

impl Default for InstructionMemory {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl InstructionSource for InstructionMemory {
    fn read(&self, pc: u64) -> Option<Instruction> {
        let index = usize::try_from(pc >> 2).ok()?;
        if index == 0 {
            return None;
        }
        self.slots.get(index).cloned()
    }

    fn instruction_count(&self) -> usize {
        self.slots.len()
    }
}
