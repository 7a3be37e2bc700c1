//! Simulator: builds the CPU from a configuration and a program, seeds the
//! initial state and collects the end-of-run report.

use std::path::Path;

use tracing::info;

use super::loader::load_program;
use super::state::{apply_memory_state, load_memory_state, load_registers};
use crate::common::constants::NUM_REGS;
use crate::common::error::Result;
use crate::config::Config;
use crate::core::Cpu;
use crate::isa::{InstructionMemory, InstructionSource};
use crate::stats::{MemoryWord, Report};

/// Top-level simulator owning the pipeline controller.
///
/// # Examples
///
/// ```
/// use pipesim_core::Simulator;
/// use pipesim_core::config::Config;
/// use pipesim_core::sim::loader::parse_program;
///
/// let program = parse_program(
///     "addi x1, x0, 5\n\
///      addi x2, x0, 7\n\
///      add x3, x1, x2\n",
///     1024,
/// )
/// .unwrap();
///
/// let mut sim = Simulator::new(&Config::default(), program).unwrap();
/// let report = sim.run().unwrap();
/// assert_eq!(report.register(3), Some(12));
/// assert_eq!(report.stats.instructions_retired, 3);
/// ```
#[derive(Debug)]
pub struct Simulator {
    /// Pipeline controller and all processor state.
    pub cpu: Cpu,
}

impl Simulator {
    /// Builds a simulator for `program`.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory or cache geometry is invalid.
    pub fn new(config: &Config, program: InstructionMemory) -> Result<Self> {
        Ok(Self {
            cpu: Cpu::new(config, Box::new(program))?,
        })
    }

    /// Loads a program file and builds a simulator for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the
    /// configuration is invalid.
    pub fn from_file(config: &Config, path: impl AsRef<Path>) -> Result<Self> {
        let program = load_program(path, config.memory.code_segment_bytes)?;
        Self::new(config, program)
    }

    /// Seeds every architectural register. `x0` stays zero.
    pub fn with_registers(mut self, regs: &[i64; NUM_REGS]) -> Self {
        for (idx, &value) in regs.iter().enumerate() {
            self.cpu.regs.set(idx, value);
        }
        self
    }

    /// Seeds registers from a register-state file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn with_register_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let regs = load_registers(path)?;
        Ok(self.with_registers(&regs))
    }

    /// Applies memory-state text to the backing store.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is malformed or names an invalid address.
    pub fn with_memory_state(mut self, text: &str) -> Result<Self> {
        let _ = apply_memory_state(text, self.cpu.cache.memory_mut())?;
        Ok(self)
    }

    /// Applies a memory-state file to the backing store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn with_memory_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let _ = load_memory_state(path, self.cpu.cache.memory_mut())?;
        Ok(self)
    }

    /// Sets a single register before the run.
    pub fn set_register(&mut self, idx: usize, value: i64) {
        self.cpu.regs.set(idx, value);
    }

    /// Stores a single data word before the run.
    ///
    /// # Errors
    ///
    /// Returns an error if `addr` is misaligned or not a data address.
    pub fn store_word(&mut self, addr: u64, value: i64) -> Result<()> {
        self.cpu.cache.memory_mut().store(addr, value)
    }

    /// Runs until the program has retired and the pipeline is drained, then
    /// returns the report.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: an illegal data access or the cycle
    /// limit being exceeded.
    pub fn run(&mut self) -> Result<Report> {
        info!(
            instructions = self.cpu.program.instruction_count().saturating_sub(1),
            speculation = ?self.cpu.speculation,
            forwarding = ?self.cpu.forwarding,
            "start running"
        );
        self.cpu.run()?;
        let report = self.report()?;
        info!(
            cycles = report.stats.cycles,
            retired = report.stats.instructions_retired,
            cpi = report.cpi,
            "done"
        );
        Ok(report)
    }

    /// Collects the current statistics, register values and every memory
    /// word a block fetch has touched.
    ///
    /// Touched words are read through the cache so that dirty copies are
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns an error only if a touched address is no longer a valid data
    /// address, which cannot happen for words the cache fetched.
    pub fn report(&self) -> Result<Report> {
        let memory = self
            .cpu
            .cache
            .memory()
            .accessed_words()
            .map(|(addr, _)| {
                Ok(MemoryWord {
                    addr,
                    value: self.cpu.cache.peek_word(addr)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Report::new(
            self.cpu.stats.clone(),
            self.cpu.regs.gpr().values(),
            memory,
        ))
    }
}
