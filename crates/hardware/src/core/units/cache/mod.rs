//! Set-Associative Data Cache.
//!
//! This module implements the blocking, write-back data cache in front of the
//! [`DataMemory`] backing store. It models:
//! 1. **Lookup:** Address decomposition into set index and tag; all ways of the
//!    set are searched.
//! 2. **Blocking Misses:** A missing access is held by the cache until the
//!    backing store responds, then replayed against the filled block.
//! 3. **Replacement:** An invalid way if one exists, else the least recently
//!    used way by access timestamp. Dirty victims are written back.
//!
//! Hits complete in the cycle they are issued.

use tracing::debug;

use crate::common::constants::{WORD_ALIGN_MASK, WORD_BYTES};
use crate::common::error::{Result, SimError};
use crate::config::CacheConfig;
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;
use crate::soc::memory::{BlockResponse, DataMemory};
use crate::stats::CacheStats;

/// Cache line holding a copy of one memory block.
#[derive(Debug, Clone, Default)]
struct CacheLine {
    tag: u64,
    data: Vec<i64>,
    valid: bool,
    dirty: bool,
    last_access: u64,
}

/// Blocking set-associative cache that owns its backing store.
#[derive(Debug, Clone)]
pub struct DataCache {
    memory: DataMemory,
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    block_bytes: u64,
    /// log2 of the block size.
    block_offset: u32,
    /// Bit position of the tag (block offset + set index bits).
    set_offset: u32,
    pending: Option<Instruction>,
    stats: CacheStats,
}

impl DataCache {
    /// Creates a cache over `memory` with the configured geometry.
    ///
    /// # Errors
    ///
    /// * [`SimError::InvalidBlockSize`] unless the block size is a power-of-two
    ///   multiple of the word size.
    /// * [`SimError::NonPowerOfTwoWays`] unless the way count is a power of two.
    /// * [`SimError::NonPowerOfTwoSets`] unless the derived set count is a
    ///   power of two.
    pub fn new(config: &CacheConfig, memory: DataMemory) -> Result<Self> {
        let block = config.block_bytes;
        if block == 0 || !block.is_power_of_two() || (block as u64) < WORD_BYTES {
            return Err(SimError::InvalidBlockSize(block));
        }
        let ways = config.ways;
        if !ways.is_power_of_two() {
            return Err(SimError::NonPowerOfTwoWays(ways));
        }
        let num_sets = config.size_bytes / block / ways;
        if !num_sets.is_power_of_two() {
            return Err(SimError::NonPowerOfTwoSets(num_sets));
        }

        let block_offset = block.trailing_zeros();
        let words = block / WORD_BYTES as usize;
        Ok(Self {
            memory,
            lines: vec![
                CacheLine {
                    data: vec![0; words],
                    ..CacheLine::default()
                };
                num_sets * ways
            ],
            num_sets,
            ways,
            block_bytes: block as u64,
            block_offset,
            set_offset: block_offset + num_sets.trailing_zeros(),
            pending: None,
            stats: CacheStats::default(),
        })
    }

    /// Returns `true` if a new access may be issued: no miss is outstanding
    /// and the backing store is idle.
    #[inline]
    pub const fn is_free(&self) -> bool {
        self.pending.is_none() && !self.memory.is_busy()
    }

    /// Returns the access counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Returns the backing store.
    pub const fn memory(&self) -> &DataMemory {
        &self.memory
    }

    /// Returns the backing store mutably, for installing initial state.
    pub fn memory_mut(&mut self) -> &mut DataMemory {
        &mut self.memory
    }

    /// Returns the number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    fn set_index(&self, addr: u64) -> usize {
        ((addr >> self.block_offset) as usize) & (self.num_sets - 1)
    }

    const fn tag(&self, addr: u64) -> u64 {
        addr >> self.set_offset
    }

    const fn word_offset(&self, addr: u64) -> usize {
        ((addr & (self.block_bytes - 1)) / WORD_BYTES) as usize
    }

    const fn block_addr(&self, addr: u64) -> u64 {
        addr & !(self.block_bytes - 1)
    }

    /// Returns the line index of `addr` if it is resident.
    fn lookup(&self, addr: u64) -> Option<usize> {
        let base = self.set_index(addr) * self.ways;
        let tag = self.tag(addr);
        (base..base + self.ways).find(|&i| self.lines[i].valid && self.lines[i].tag == tag)
    }

    /// Issues a load. The loaded value is written to `rd_val`.
    ///
    /// # Returns
    ///
    /// The completed instruction on a hit, or `None` on a miss, in which case
    /// the cache holds the instruction until [`DataCache::run`] returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is misaligned, or if the block fetch
    /// falls outside data memory.
    pub fn read(&mut self, inst: Instruction, tick: u64) -> Result<Option<Instruction>> {
        Self::check_alignment(inst.memory_addr)?;
        self.stats.accesses += 1;
        self.stats.loads += 1;
        self.access(inst, tick)
    }

    /// Issues a store of `rs2_val`.
    ///
    /// # Returns
    ///
    /// The completed instruction on a hit, or `None` on a miss.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is misaligned, or if the block fetch
    /// falls outside data memory.
    pub fn write(&mut self, inst: Instruction, tick: u64) -> Result<Option<Instruction>> {
        Self::check_alignment(inst.memory_addr)?;
        self.stats.accesses += 1;
        self.stats.stores += 1;
        self.access(inst, tick)
    }

    fn check_alignment(addr: u64) -> Result<()> {
        if addr & WORD_ALIGN_MASK != 0 {
            return Err(SimError::MisalignedAddress(addr));
        }
        Ok(())
    }

    fn access(&mut self, mut inst: Instruction, tick: u64) -> Result<Option<Instruction>> {
        let addr = inst.memory_addr;
        if let Some(idx) = self.lookup(addr) {
            let offset = self.word_offset(addr);
            let line = &mut self.lines[idx];
            line.last_access = tick;
            if inst.opcode == Opcode::Sd {
                line.data[offset] = inst.rs2_val;
                line.dirty = true;
            } else {
                inst.rd_val = line.data[offset];
            }
            return Ok(Some(inst));
        }

        self.stats.misses += 1;
        debug!(
            tick,
            addr,
            tag = self.tag(addr),
            set = self.set_index(addr),
            "cache miss"
        );
        self.memory
            .load_block(self.block_addr(addr), self.block_bytes, tick)?;
        self.pending = Some(inst);
        Ok(None)
    }

    /// Installs a block delivered by the backing store and replays the
    /// outstanding access against it.
    ///
    /// # Returns
    ///
    /// The replayed instruction, now complete, or `None` if the outstanding
    /// access was discarded by a flush while the block was in flight.
    ///
    /// # Errors
    ///
    /// Propagates errors from the replayed access.
    pub fn handle_response(
        &mut self,
        response: BlockResponse,
        tick: u64,
    ) -> Result<Option<Instruction>> {
        let set = self.set_index(response.addr);
        let victim = self.victim(set);
        let line = &self.lines[victim];
        if line.valid {
            let victim_addr =
                (line.tag << self.set_offset) | ((set as u64) << self.block_offset);
            debug!(tick, addr = victim_addr, dirty = line.dirty, "cache block eviction");
            if line.dirty {
                self.stats.writebacks += 1;
                self.memory.write_block(victim_addr, &line.data);
            }
        }

        self.lines[victim] = CacheLine {
            tag: self.tag(response.addr),
            data: response.data,
            valid: true,
            dirty: false,
            last_access: tick,
        };

        match self.pending.take() {
            Some(inst) => self.access(inst, tick),
            None => Ok(None),
        }
    }

    /// Picks the way to replace in `set`: the first invalid way, else the
    /// least recently accessed.
    fn victim(&self, set: usize) -> usize {
        let base = set * self.ways;
        let ways = base..base + self.ways;
        ways.clone()
            .find(|&i| !self.lines[i].valid)
            .or_else(|| ways.min_by_key(|&i| self.lines[i].last_access))
            .unwrap_or(base)
    }

    /// Advances the backing store by one tick.
    ///
    /// # Returns
    ///
    /// The held instruction once its miss has been serviced and replayed.
    ///
    /// # Errors
    ///
    /// Propagates errors from the replayed access.
    pub fn run(&mut self, tick: u64) -> Result<Option<Instruction>> {
        match self.memory.run(tick) {
            Some(response) => self.handle_response(response, tick),
            None => Ok(None),
        }
    }

    /// Discards the held instruction. An in-flight block fetch still
    /// completes and is installed.
    pub fn flush(&mut self) -> Option<Instruction> {
        self.pending.take()
    }

    /// Reads the current value of the word at `addr`, from a resident
    /// block if present, else from the backing store. Untimed and uncounted.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is misaligned or not a data address.
    pub fn peek_word(&self, addr: u64) -> Result<i64> {
        Self::check_alignment(addr)?;
        match self.lookup(addr) {
            Some(idx) => Ok(self.lines[idx].data[self.word_offset(addr)]),
            None => self.memory.load(addr),
        }
    }
}
