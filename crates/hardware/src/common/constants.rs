//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Instruction Constants:** Instruction width and immediate field widths.
//! 2. **Register Constants:** Architectural register count.
//! 3. **Memory Constants:** Word size, alignment mask, and minimum memory size.

/// Size of an instruction in bytes. PCs advance in units of this width.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Number of architectural integer registers (`x0`-`x31`).
pub const NUM_REGS: usize = 32;

/// Size of a data word (doubleword) in bytes.
pub const WORD_BYTES: u64 = 8;

/// Mask of address bits that must be zero for a word-aligned access.
pub const WORD_ALIGN_MASK: u64 = WORD_BYTES - 1;

/// Smallest backing store the simulator accepts (2 KiB).
pub const MIN_MEMORY_SIZE: u64 = 2048;

/// Signed width of I-type and S-type immediates in bits.
pub const IMM12_BITS: u32 = 12;

/// Signed width of U-type immediates in bits.
pub const IMM20_BITS: u32 = 20;

/// Shift applied to a `lui` immediate to form the upper value.
pub const LUI_SHIFT: u32 = 20;

/// Returns `true` if `value` fits in a two's-complement field of `bits` bits.
#[inline]
pub const fn fits_signed(value: i64, bits: u32) -> bool {
    let shifted = value >> (bits - 1);
    shifted == 0 || shifted == -1
}
