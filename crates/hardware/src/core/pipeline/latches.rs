//! Pipeline latch structures for inter-stage communication.
//!
//! Four single-entry latches connect the five stages:
//! Fetch → IF/ID → Decode → ID/EX → Execute → EX/MEM → Memory → MEM/WB → Writeback.
//!
//! A stage may only write into its downstream latch while that latch is empty.
//! This is the only structural hazard mechanism: an occupied latch stalls
//! every stage behind it.

use crate::isa::instruction::Instruction;

/// A single-capacity holding register for one in-flight instruction.
#[derive(Debug, Clone, Default)]
pub struct Latch {
    slot: Option<Instruction>,
}

impl Latch {
    /// Creates an empty latch.
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Returns `true` if the latch holds no instruction.
    #[inline]
    pub const fn is_free(&self) -> bool {
        self.slot.is_none()
    }

    /// Places an instruction into the latch.
    ///
    /// The caller must have checked [`Latch::is_free`].
    pub fn write(&mut self, inst: Instruction) {
        debug_assert!(self.slot.is_none(), "write into occupied latch");
        self.slot = Some(inst);
    }

    /// Removes and returns the held instruction.
    pub fn take(&mut self) -> Option<Instruction> {
        self.slot.take()
    }

    /// Borrows the held instruction.
    pub const fn peek(&self) -> Option<&Instruction> {
        self.slot.as_ref()
    }

    /// Mutably borrows the held instruction.
    pub fn peek_mut(&mut self) -> Option<&mut Instruction> {
        self.slot.as_mut()
    }

    /// Discards the held instruction, returning it if there was one.
    pub fn flush(&mut self) -> Option<Instruction> {
        self.slot.take()
    }
}

/// The four inter-stage latches of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Latches {
    /// Fetch → Decode.
    pub if_id: Latch,
    /// Decode → Execute.
    pub id_ex: Latch,
    /// Execute → Memory.
    pub ex_mem: Latch,
    /// Memory → Writeback.
    pub mem_wb: Latch,
}

impl Latches {
    /// Returns `true` if every latch is empty.
    pub const fn all_free(&self) -> bool {
        self.if_id.is_free() && self.id_ex.is_free() && self.ex_mem.is_free() && self.mem_wb.is_free()
    }

    /// Empties every latch, returning how many instructions were discarded.
    pub fn flush(&mut self) -> usize {
        [
            &mut self.if_id,
            &mut self.id_ex,
            &mut self.ex_mem,
            &mut self.mem_wb,
        ]
        .into_iter()
        .filter_map(Latch::flush)
        .count()
    }
}
