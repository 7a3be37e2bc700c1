//! Data Memory (backing store).
//!
//! This module implements the latency-bearing store behind the data cache. It provides:
//! 1. **Buffer:** Doubleword storage with "ever accessed" tracking.
//! 2. **Controller:** Latency model for block fetches.
//! 3. **Request Slot:** At most one outstanding block fetch, delivered once its
//!    response tick is reached.
//!
//! The bottom of the address space is reserved for code; data accesses there
//! are fatal.

/// Doubleword storage with access tracking.
pub mod buffer;

/// Memory controller implementations for access latency modeling.
pub mod controller;

use std::fmt;

use tracing::trace;

use self::buffer::WordBuffer;
use self::controller::{MemoryController, SimpleController};
use crate::common::constants::{MIN_MEMORY_SIZE, WORD_ALIGN_MASK, WORD_BYTES};
use crate::common::error::{Result, SimError};
use crate::config::MemoryConfig;

/// An in-flight block fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Request {
    addr: u64,
    words: usize,
    ready_tick: u64,
}

/// A block delivered to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockResponse {
    /// Block-aligned address of the first word.
    pub addr: u64,
    /// Word contents at the time of delivery.
    pub data: Vec<i64>,
}

/// Fixed-capacity, word-addressed backing store with a single request slot.
#[derive(Debug, Clone)]
pub struct DataMemory {
    buffer: WordBuffer,
    size: u64,
    code_segment: u64,
    controller: SimpleController,
    request: Option<Request>,
}

impl DataMemory {
    /// Creates a zeroed memory from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemorySize`] if the size is not a multiple of
    /// the word size, or [`SimError::MemoryTooSmall`] below 2 KiB.
    pub fn new(config: &MemoryConfig) -> Result<Self> {
        let size = config.size_bytes;
        if size & WORD_ALIGN_MASK != 0 {
            return Err(SimError::InvalidMemorySize(size));
        }
        if size < MIN_MEMORY_SIZE {
            return Err(SimError::MemoryTooSmall {
                size,
                min: MIN_MEMORY_SIZE,
            });
        }
        Ok(Self {
            buffer: WordBuffer::new((size / WORD_BYTES) as usize),
            size,
            code_segment: config.code_segment_bytes,
            controller: SimpleController::new(config.latency),
            request: None,
        })
    }

    /// Memory capacity in bytes.
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Bytes reserved for the code segment.
    pub const fn code_segment(&self) -> u64 {
        self.code_segment
    }

    /// Returns `true` while a block fetch is outstanding.
    pub const fn is_busy(&self) -> bool {
        self.request.is_some()
    }

    /// Validates that `bytes` starting at `addr` are aligned, in bounds and
    /// outside the code segment.
    ///
    /// # Errors
    ///
    /// Returns the matching [`SimError`] for the first violated condition.
    pub fn check_range(&self, addr: u64, bytes: u64) -> Result<()> {
        if addr & WORD_ALIGN_MASK != 0 {
            return Err(SimError::MisalignedAddress(addr));
        }
        match addr.checked_add(bytes) {
            Some(end) if end <= self.size => {}
            _ => return Err(SimError::AddressOutOfBounds(addr)),
        }
        if addr < self.code_segment {
            return Err(SimError::CodeSegmentAccess(addr));
        }
        Ok(())
    }

    /// Starts fetching the block of `bytes` at `addr`.
    ///
    /// Marks every word of the block as accessed and schedules the response
    /// for `tick + latency`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is misaligned, out of bounds or inside
    /// the code segment.
    pub fn load_block(&mut self, addr: u64, bytes: u64, tick: u64) -> Result<()> {
        self.check_range(addr, bytes)?;
        debug_assert!(self.request.is_none(), "backing store has one request slot");

        let words = (bytes / WORD_BYTES) as usize;
        self.buffer.mark_accessed(Self::word_index(addr), words);
        let ready_tick = tick + self.controller.access_latency(addr);
        trace!(tick, addr, ready_tick, "memory: block fetch");
        self.request = Some(Request {
            addr,
            words,
            ready_tick,
        });
        Ok(())
    }

    /// Delivers the outstanding block once its response tick is reached.
    pub fn run(&mut self, tick: u64) -> Option<BlockResponse> {
        let req = self.request.filter(|r| tick >= r.ready_tick)?;
        self.request = None;
        let data = self
            .buffer
            .read_slice(Self::word_index(req.addr), req.words)
            .unwrap_or_default();
        Some(BlockResponse {
            addr: req.addr,
            data,
        })
    }

    /// Writes a whole block back (dirty eviction). Untimed.
    pub fn write_block(&mut self, addr: u64, data: &[i64]) {
        self.buffer.write_slice(Self::word_index(addr), data);
    }

    /// Reads a word directly, bypassing timing and access tracking.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is misaligned, out of bounds or in the
    /// code segment.
    pub fn load(&self, addr: u64) -> Result<i64> {
        self.check_range(addr, WORD_BYTES)?;
        Ok(self.buffer.get(Self::word_index(addr)).unwrap_or(0))
    }

    /// Writes a word directly, bypassing timing and access tracking.
    ///
    /// Used to install initial memory state.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is misaligned, out of bounds or in the
    /// code segment.
    pub fn store(&mut self, addr: u64, value: i64) -> Result<()> {
        self.check_range(addr, WORD_BYTES)?;
        self.buffer.set(Self::word_index(addr), value);
        Ok(())
    }

    /// Iterates over `(address, value)` of every word a block fetch has covered.
    pub fn accessed_words(&self) -> impl Iterator<Item = (u64, i64)> + '_ {
        self.buffer
            .accessed()
            .map(|(idx, val)| (idx as u64 * WORD_BYTES, val))
    }

    #[inline]
    const fn word_index(addr: u64) -> usize {
        (addr / WORD_BYTES) as usize
    }
}

impl fmt::Display for DataMemory {
    /// One `(address) = value` line per accessed word.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (addr, val) in self.accessed_words() {
            writeln!(f, "({addr}) = {val}")?;
        }
        Ok(())
    }
}
