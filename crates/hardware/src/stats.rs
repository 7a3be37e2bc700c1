//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and CPI:** Total cycles, fetch stalls, retired instructions.
//! 2. **Branch prediction:** Predictions, mispredictions, flushes and accuracy.
//! 3. **Data cache:** Loads, stores, accesses, misses, writebacks and miss rate.
//! 4. **Report:** Final statistics plus register and touched-memory state,
//!    printable as text or serializable to JSON.

use std::fmt;

use serde::Serialize;

use crate::common::constants::NUM_REGS;

/// Data cache counters.
///
/// `accesses` counts each load or store issued to the cache once; a miss is
/// counted in `misses` and not again when the access is replayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Load accesses issued.
    pub loads: u64,
    /// Store accesses issued.
    pub stores: u64,
    /// Total accesses issued.
    pub accesses: u64,
    /// Accesses that missed.
    pub misses: u64,
    /// Dirty blocks written back on eviction.
    pub writebacks: u64,
}

impl CacheStats {
    /// Accesses that hit.
    pub const fn hits(&self) -> u64 {
        self.accesses.saturating_sub(self.misses)
    }

    /// Fraction of accesses that missed (0 with no accesses).
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.accesses as f64
        }
    }
}

/// Pipeline statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total clock ticks elapsed.
    pub cycles: u64,
    /// Ticks in which fetch could not proceed because IF/ID was occupied.
    pub stalls: u64,
    /// Number of instructions retired at writeback.
    pub instructions_retired: u64,
    /// Number of pipeline flushes.
    pub flushes: u64,
    /// Conditional branches resolved at writeback.
    pub branch_predictions: u64,
    /// Resolved branches whose predicted direction was wrong.
    pub branch_mispredictions: u64,
    /// Data cache counters.
    pub cache: CacheStats,
}

impl SimStats {
    /// Cycles per retired instruction (0 if nothing retired).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Fraction of branches predicted correctly (0 with no branches).
    pub fn branch_accuracy(&self) -> f64 {
        if self.branch_predictions == 0 {
            0.0
        } else {
            (self.branch_predictions - self.branch_mispredictions) as f64
                / self.branch_predictions as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let correct = self.branch_predictions - self.branch_mispredictions;
        writeln!(f, "==========================================================")?;
        writeln!(f, "PIPELINE STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_stalls               {}", self.stalls)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_cpi                  {:.3}", self.cpi())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "BRANCH PREDICTION")?;
        writeln!(f, "  flushes                {}", self.flushes)?;
        writeln!(
            f,
            "  accuracy               {:.3} ({correct}/{})",
            self.branch_accuracy(),
            self.branch_predictions
        )?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "DATA CACHE")?;
        writeln!(f, "  loads                  {}", self.cache.loads)?;
        writeln!(f, "  stores                 {}", self.cache.stores)?;
        writeln!(f, "  writebacks             {}", self.cache.writebacks)?;
        writeln!(
            f,
            "  miss_rate              {:.3} ({}/{})",
            self.cache.miss_rate(),
            self.cache.misses,
            self.cache.accesses
        )
    }
}

/// A touched data memory word in the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryWord {
    /// Word address.
    pub addr: u64,
    /// Final value, including any dirty cached copy.
    pub value: i64,
}

/// End-of-run report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Pipeline statistics.
    pub stats: SimStats,
    /// Cycles per instruction.
    pub cpi: f64,
    /// Branch prediction accuracy.
    pub branch_accuracy: f64,
    /// Data cache miss rate.
    pub cache_miss_rate: f64,
    /// Final register values, `x0` first.
    pub registers: Vec<i64>,
    /// Final values of every word a block fetch touched, in address order.
    pub memory: Vec<MemoryWord>,
}

impl Report {
    /// Assembles a report, computing the derived ratios.
    pub fn new(stats: SimStats, registers: &[i64; NUM_REGS], memory: Vec<MemoryWord>) -> Self {
        Self {
            cpi: stats.cpi(),
            branch_accuracy: stats.branch_accuracy(),
            cache_miss_rate: stats.cache.miss_rate(),
            stats,
            registers: registers.to_vec(),
            memory,
        }
    }

    /// Final value of register `idx`.
    pub fn register(&self, idx: usize) -> Option<i64> {
        self.registers.get(idx).copied()
    }

    /// Final value of the touched word at `addr`.
    pub fn memory_word(&self, addr: u64) -> Option<i64> {
        self.memory
            .iter()
            .find(|w| w.addr == addr)
            .map(|w| w.value)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stats)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "REGISTER STATE")?;
        for (i, val) in self.registers.iter().enumerate() {
            writeln!(f, "  x{i} = {val}")?;
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "MEMORY STATE (accessed addresses only)")?;
        for w in &self.memory {
            writeln!(f, "  ({}) = {}", w.addr, w.value)?;
        }
        writeln!(f, "==========================================================")
    }
}
