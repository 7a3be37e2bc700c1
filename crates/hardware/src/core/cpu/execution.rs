//! Main Execution Loop.
//!
//! This module implements the per-tick cycle of the CPU. It performs the following:
//! 1. **Timing Management:** Advances the clock and enforces the cycle limit.
//! 2. **Pipeline Coordination:** Runs the stages in reverse data-flow order so
//!    each stage sees the latch occupancy left by the stage after it.
//! 3. **Recovery:** Flushes all in-flight work after a control-flow correction.

use tracing::debug;

use super::Cpu;
use crate::common::error::{Result, SimError};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};

impl Cpu {
    /// Advances the pipeline by one clock tick.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimitExceeded`] once the clock passes the
    /// configured limit, or any fatal memory error raised by the memory stage.
    pub fn tick(&mut self) -> Result<()> {
        self.ticks += 1;
        self.stats.cycles = self.ticks;
        if let Some(limit) = self.max_cycles {
            if self.ticks > limit {
                return Err(SimError::CycleLimitExceeded(limit));
            }
        }

        wb_stage(self);
        mem_stage(self)?;
        execute_stage(self);
        decode_stage(self);
        fetch_stage(self);
        self.stats.cache = *self.cache.stats();
        Ok(())
    }

    /// Returns `true` until the pipeline has started and fully drained.
    pub const fn is_running(&self) -> bool {
        self.ticks == 0 || !self.is_drained()
    }

    /// Returns `true` if no instruction is in flight anywhere.
    pub const fn is_drained(&self) -> bool {
        self.latches.all_free() && self.alu.is_free() && self.cache.is_free()
    }

    /// Ticks until the program has been fetched to its end and the pipeline
    /// has drained.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal error from [`Cpu::tick`].
    pub fn run(&mut self) -> Result<()> {
        while self.is_running() {
            self.tick()?;
        }
        Ok(())
    }

    /// Discards every in-flight instruction and clears the dependency table.
    ///
    /// Empties all four latches, the functional unit and any access the cache
    /// is holding for a miss. An outstanding block fetch still completes.
    pub fn flush(&mut self) {
        let mut discarded = self.latches.flush();
        discarded += usize::from(self.alu.flush().is_some());
        discarded += usize::from(self.cache.flush().is_some());
        self.regs.flush();
        self.stats.flushes += 1;
        debug!(tick = self.ticks, discarded, "pipeline flush");
    }
}
