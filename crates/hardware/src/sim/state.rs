//! Initial Register and Memory State.
//!
//! Both files are line oriented, with `#` comments and blank lines allowed and
//! spaces ignored:
//! 1. **Register state:** `xN = value`, one line for every register `x0`-`x31`.
//! 2. **Memory state:** `address = value` for 8-byte aligned data addresses.

use std::path::Path;

use tracing::debug;

use super::loader::read_text;
use crate::common::constants::{NUM_REGS, WORD_ALIGN_MASK, WORD_BYTES};
use crate::common::error::{LoadError, Result};
use crate::soc::memory::DataMemory;

/// Iterates over `(line number, content)` of every non-empty line with
/// comments and whitespace removed.
fn entries(text: &str) -> impl Iterator<Item = (usize, String)> + '_ {
    text.lines().enumerate().filter_map(|(idx, raw)| {
        let code: String = raw
            .split('#')
            .next()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        (!code.is_empty()).then_some((idx + 1, code))
    })
}

fn parse_integer(token: &str) -> Option<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Parses a register-state file into register values.
///
/// `x0` is forced to zero whatever value it is given.
///
/// # Errors
///
/// Returns a [`LoadError`] for an unknown register name, a missing or
/// non-integer value, a register defined twice, or a register never defined.
pub fn parse_registers(text: &str) -> Result<[i64; NUM_REGS], LoadError> {
    let mut regs = [0; NUM_REGS];
    let mut loaded = 0u32;

    for (line, entry) in entries(text) {
        let entry = entry.to_lowercase();
        let (name, value) = entry.split_once('=').unwrap_or((entry.as_str(), ""));

        let idx = name
            .strip_prefix('x')
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|d| d.parse::<usize>().ok())
            .filter(|&idx| idx < NUM_REGS)
            .ok_or_else(|| LoadError::InvalidRegisterName {
                name: name.to_string(),
                line,
            })?;
        let value = parse_integer(value).ok_or_else(|| LoadError::InvalidRegisterValue {
            name: name.to_string(),
            line,
        })?;

        if loaded & (1 << idx) != 0 {
            return Err(LoadError::RegisterRedefined {
                name: name.to_string(),
                line,
            });
        }
        loaded |= 1 << idx;
        regs[idx] = value;
    }
    regs[0] = 0;

    if loaded != u32::MAX {
        return Err(LoadError::RegisterUndefined(loaded.trailing_ones() as usize));
    }
    Ok(regs)
}

/// Reads and parses a register-state file.
///
/// # Errors
///
/// Returns [`SimError::Io`](crate::common::SimError::Io) if the file cannot be
/// read, or [`SimError::Load`](crate::common::SimError::Load) if it is malformed.
pub fn load_registers(path: impl AsRef<Path>) -> Result<[i64; NUM_REGS]> {
    let regs = parse_registers(&read_text(path.as_ref())?)?;
    debug!(path = %path.as_ref().display(), "register state loaded");
    Ok(regs)
}

/// Parses a memory-state file and stores each word into `memory`.
///
/// Redefining a word is only an error when the word already holds a
/// different nonzero value.
///
/// # Errors
///
/// Returns [`SimError::Load`](crate::common::SimError::Load) for a malformed
/// line, or an address that is misaligned, out of bounds, inside the code segment or redefined.
pub fn apply_memory_state(text: &str, memory: &mut DataMemory) -> Result<usize> {
    let mut stored = 0;
    for (line, entry) in entries(text) {
        let parsed = entry
            .split_once('=')
            .and_then(|(addr, value)| Some((parse_integer(addr)?, parse_integer(value)?)));
        let Some((addr, value)) = parsed.filter(|&(addr, _)| addr >= 0) else {
            return Err(LoadError::InvalidMemoryEntry { text: entry, line }.into());
        };
        let addr = addr as u64;

        if addr & WORD_ALIGN_MASK != 0 {
            return Err(LoadError::MisalignedMemoryEntry { addr, line }.into());
        }
        if addr.saturating_add(WORD_BYTES) > memory.size() {
            return Err(LoadError::MemoryEntryOutOfBounds { addr, line }.into());
        }
        if addr < memory.code_segment() {
            return Err(LoadError::MemoryEntryInCodeSegment { addr, line }.into());
        }

        let current = memory.load(addr)?;
        if current != 0 && current != value {
            return Err(LoadError::MemoryRedefined { addr, line }.into());
        }
        memory.store(addr, value)?;
        stored += 1;
    }
    Ok(stored)
}

/// Reads a memory-state file and applies it to `memory`.
///
/// # Errors
///
/// Returns [`SimError::Io`](crate::common::SimError::Io) if the file cannot be
/// read, or any error from [`apply_memory_state`].
pub fn load_memory_state(path: impl AsRef<Path>, memory: &mut DataMemory) -> Result<usize> {
    let stored = apply_memory_state(&read_text(path.as_ref())?, memory)?;
    debug!(path = %path.as_ref().display(), words = stored, "memory state loaded");
    Ok(stored)
}
