//! Hazard-tracking register file.
//!
//! Wraps the architectural [`Gpr`] with a dependency table mapping each
//! register to the tag of its latest in-flight producer. It provides:
//! 1. **Hazard Detection:** Decode stalls while a producer has no result yet.
//! 2. **Operand Forwarding:** Published results bypass the register file.
//! 3. **Recovery:** A flush drops every outstanding producer.
//!
//! The table never owns an instruction. A producer publishes its result into
//! its own entry when the value becomes available, and clears the entry at
//! commit only if no younger producer has claimed the register since.

use crate::common::constants::NUM_REGS;
use crate::core::arch::gpr::Gpr;
use crate::isa::instruction::{InstTag, Instruction};

/// The latest in-flight writer of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Producer {
    /// Fetch tag of the producing instruction.
    pub tag: InstTag,
    /// Result available for forwarding, once published.
    pub value: Option<i64>,
}

/// Register file with last-writer dependency tracking.
#[derive(Debug, Clone, Default)]
pub struct RegisterFile {
    gpr: Gpr,
    deps: [Option<Producer>; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with all registers zero and no producers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a register directly, bypassing dependency tracking.
    ///
    /// Used to load initial state before the run starts.
    pub fn set(&mut self, idx: usize, value: i64) {
        self.gpr.write(idx, value);
    }

    /// Reads the committed value of a register.
    pub fn read(&self, idx: usize) -> i64 {
        self.gpr.read(idx)
    }

    /// Returns the architectural register file.
    pub const fn gpr(&self) -> &Gpr {
        &self.gpr
    }

    /// Returns the outstanding producer of a register, if any.
    pub fn producer(&self, idx: usize) -> Option<Producer> {
        self.deps.get(idx).copied().flatten()
    }

    /// Returns `true` if no register has an outstanding producer.
    pub fn is_clear(&self) -> bool {
        self.deps.iter().all(Option::is_none)
    }

    /// Resolves the source operands of `inst` and claims its destination.
    ///
    /// Each source with an outstanding producer takes the producer's
    /// published value, or stalls if none has been published. Sources with no
    /// producer read the architectural register. If nothing stalled and the
    /// instruction writes a register, it becomes that register's producer,
    /// displacing any older one.
    ///
    /// # Returns
    ///
    /// `true` if the instruction must stall in decode and retry next cycle.
    pub fn dep_check(&mut self, inst: &mut Instruction) -> bool {
        let mut stall = false;

        if inst.rs1 != 0 {
            match self.resolve(inst.rs1) {
                Some(val) => inst.rs1_val = val,
                None => stall = true,
            }
        }
        if inst.rs2 != 0 {
            match self.resolve(inst.rs2) {
                Some(val) => inst.rs2_val = val,
                None => stall = true,
            }
        }

        if !stall && inst.writes_rd() {
            if let Some(slot) = self.deps.get_mut(inst.rd) {
                *slot = Some(Producer {
                    tag: inst.tag,
                    value: None,
                });
            }
        }
        stall
    }

    fn resolve(&self, idx: usize) -> Option<i64> {
        match self.producer(idx) {
            Some(producer) => producer.value,
            None => Some(self.gpr.read(idx)),
        }
    }

    /// Makes a producer's result available to consumers.
    ///
    /// Ignored if the register has since been claimed by another instruction.
    pub fn publish(&mut self, tag: InstTag, idx: usize, value: i64) {
        if let Some(Some(producer)) = self.deps.get_mut(idx) {
            if producer.tag == tag {
                producer.value = Some(value);
            }
        }
    }

    /// Commits `value` to register `idx` on behalf of the instruction `tag`.
    ///
    /// The dependency entry is cleared only if it still names `tag`.
    pub fn write(&mut self, tag: InstTag, idx: usize, value: i64) {
        self.gpr.write(idx, value);
        if let Some(slot) = self.deps.get_mut(idx) {
            if slot.is_some_and(|p| p.tag == tag) {
                *slot = None;
            }
        }
    }

    /// Drops every outstanding producer.
    pub fn flush(&mut self) {
        self.deps = [None; NUM_REGS];
    }
}
