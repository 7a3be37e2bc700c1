//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the pipeline controller
//! that owns every piece of processor state. It coordinates the following:
//! 1. **State Management:** Program counter, clock, and the register file.
//! 2. **Pipeline Control:** The four inter-stage latches and the functional unit.
//! 3. **Memory Hierarchy:** The data cache and its backing store.
//! 4. **Speculation:** The branch unit and the policies selected by configuration.

/// Clock, run loop and flush/recovery.
pub mod execution;

use std::fmt;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::Result;
use crate::config::{Config, Forwarding, Speculation};
use crate::core::pipeline::hazards::RegisterFile;
use crate::core::pipeline::latches::Latches;
use crate::core::units::alu::FunctionalUnit;
use crate::core::units::bru::BranchUnit;
use crate::core::units::cache::DataCache;
use crate::isa::instruction::InstTag;
use crate::isa::program::InstructionSource;
use crate::soc::memory::DataMemory;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state and components.
///
/// The CPU advances five stages once per tick and tracks performance
/// statistics. Every field is public so tests can inspect and seed state.
pub struct Cpu {
    /// Program Counter. Zero blocks fetch.
    pub pc: u64,
    /// Clock ticks elapsed.
    pub ticks: u64,
    /// Register file with dependency tracking.
    pub regs: RegisterFile,
    /// Inter-stage latches.
    pub latches: Latches,
    /// Functional unit of the Execute stage.
    pub alu: FunctionalUnit,
    /// Data cache, owning the backing store.
    pub cache: DataCache,
    /// Direction predictor and BTB.
    pub branch_unit: BranchUnit,
    /// Instruction source read by fetch.
    pub program: Box<dyn InstructionSource>,
    /// Branch speculation policy.
    pub speculation: Speculation,
    /// Operand forwarding policy.
    pub forwarding: Forwarding,
    /// Emit per-stage trace events.
    pub trace: bool,
    /// Abort once the clock passes this tick.
    pub max_cycles: Option<u64>,
    /// Performance statistics.
    pub stats: SimStats,
    next_tag: u64,
}

impl Cpu {
    /// Creates a CPU with empty pipeline and zeroed state, ready to fetch
    /// from PC 4.
    ///
    /// # Arguments
    ///
    /// * `config` - The simulator configuration parameters.
    /// * `program` - The instruction source fetch reads from.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory or cache geometry is invalid.
    pub fn new(config: &Config, program: Box<dyn InstructionSource>) -> Result<Self> {
        let memory = DataMemory::new(&config.memory)?;
        let cache = DataCache::new(&config.cache, memory)?;

        Ok(Self {
            pc: INSTRUCTION_SIZE,
            ticks: 0,
            regs: RegisterFile::new(),
            latches: Latches::default(),
            alu: FunctionalUnit::new(),
            cache,
            branch_unit: BranchUnit::new(&config.pipeline),
            program,
            speculation: config.pipeline.speculation,
            forwarding: config.pipeline.forwarding,
            trace: config.general.trace,
            max_cycles: config.general.max_cycles,
            stats: SimStats::default(),
            next_tag: 0,
        })
    }

    /// Allocates the tag for the next fetched instruction.
    pub(crate) const fn alloc_tag(&mut self) -> InstTag {
        self.next_tag += 1;
        InstTag(self.next_tag)
    }

    /// Returns `true` if results are forwarded before retirement.
    #[inline]
    pub const fn forwards(&self) -> bool {
        matches!(self.forwarding, Forwarding::Enabled)
    }

    /// Returns `true` if fetch follows branch predictions.
    #[inline]
    pub const fn speculates(&self) -> bool {
        matches!(self.speculation, Speculation::Enabled)
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("pc", &self.pc)
            .field("ticks", &self.ticks)
            .field("latches", &self.latches)
            .field("alu", &self.alu)
            .field("speculation", &self.speculation)
            .field("forwarding", &self.forwarding)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
