//! General-Purpose Register File.
//!
//! This module implements the architectural integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 signed 64-bit registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Reporting:** Exposes the complete register state for end-of-run reports.

use std::fmt;

use crate::common::constants::NUM_REGS;

/// General-Purpose Register file.
///
/// Register `x0` is hardwired to zero and cannot be modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gpr {
    regs: [i64; NUM_REGS],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The value stored in the register. Register `x0` and out-of-range
    /// indices read as 0.
    pub fn read(&self, idx: usize) -> i64 {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a register value. Writes to `x0` are ignored.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The value to write.
    pub fn write(&mut self, idx: usize, val: i64) {
        if idx != 0 {
            if let Some(reg) = self.regs.get_mut(idx) {
                *reg = val;
            }
        }
    }

    /// Returns all register values, `x0` first.
    pub const fn values(&self) -> &[i64; NUM_REGS] {
        &self.regs
    }
}

impl fmt::Display for Gpr {
    /// One `xN = value` line per register.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, val) in self.regs.iter().enumerate() {
            writeln!(f, "x{i} = {val}")?;
        }
        Ok(())
    }
}
