//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory, cache, branch predictor).
//! 2. **Structures:** Hierarchical config for general, pipeline, cache, and memory.
//! 3. **Enums:** Speculation and forwarding policies and branch predictor types.
//!
//! Policy switches are selected once at startup. Configuration is supplied as
//! JSON (`Config::from_json`) or use `Config::default()` for the CLI.

use serde::Deserialize;

use crate::common::error::Result;

/// Default configuration constants for the simulator.
mod defaults {
    /// Backing store size in bytes (4 KiB).
    pub const MEMORY_SIZE: u64 = 4096;

    /// Backing store response latency in ticks.
    ///
    /// A zero latency lets a miss resolve in the same cycle it was issued.
    pub const MEMORY_LATENCY: u64 = 0;

    /// Bytes at the bottom of the address space reserved for code.
    pub const CODE_SEGMENT_SIZE: u64 = 1024;

    /// Data cache capacity in bytes (1 KiB).
    pub const CACHE_SIZE: usize = 1024;

    /// Data cache block size in bytes (one doubleword).
    pub const CACHE_BLOCK: usize = 8;

    /// Data cache associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: usize = 1;

    /// Direction predictor table size.
    pub const PREDICTOR_ENTRIES: usize = 16;

    /// Branch Target Buffer size.
    pub const BTB_ENTRIES: usize = 16;
}

/// Whether fetch speculates past unresolved conditional branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Speculation {
    /// Fetch blocks at each conditional branch until writeback resolves it.
    #[default]
    Disabled,
    /// Fetch follows the branch predictor; mispredictions flush at writeback.
    Enabled,
}

/// Whether results are forwarded to consumers before the producer retires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Forwarding {
    /// Consumers wait in decode until the producer commits at writeback.
    Disabled,
    /// Results are forwarded as soon as the functional unit or cache produces them.
    #[default]
    Enabled,
}

/// Branch direction prediction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Always predict not-taken.
    #[default]
    Static,
    /// Per-PC 2-bit saturating counters.
    Bimodal,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::{Config, Forwarding, Speculation};
///
/// let config = Config::default();
/// assert_eq!(config.pipeline.speculation, Speculation::Disabled);
/// assert_eq!(config.pipeline.forwarding, Forwarding::Enabled);
/// assert_eq!(config.cache.size_bytes, 1024);
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use pipesim_core::config::{BranchPredictor, Config, Speculation};
///
/// let json = r#"{
///     "pipeline": { "speculation": "Enabled", "branch_predictor": "Bimodal" },
///     "cache": { "size_bytes": 2048, "block_bytes": 32, "ways": 2 },
///     "memory": { "latency": 10 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.pipeline.speculation, Speculation::Enabled);
/// assert_eq!(config.pipeline.branch_predictor, BranchPredictor::Bimodal);
/// assert_eq!(config.cache.ways, 2);
/// assert_eq!(config.memory.latency, 10);
/// assert_eq!(config.memory.size_bytes, 4096);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline policy and branch predictor configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Data cache geometry
    #[serde(default)]
    pub cache: CacheConfig,
    /// Backing store configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`](crate::common::SimError::Config) if the
    /// text is not valid JSON or names an unknown enum variant.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Abort the run once the clock passes this many ticks (`None` = unlimited).
    #[serde(default)]
    pub max_cycles: Option<u64>,

    /// Emit a cycle-by-cycle pipeline trace at `trace` level.
    #[serde(default)]
    pub trace: bool,
}

/// Pipeline policies and branch predictor sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Branch speculation policy
    #[serde(default)]
    pub speculation: Speculation,

    /// Operand forwarding policy
    #[serde(default)]
    pub forwarding: Forwarding,

    /// Branch direction predictor type
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// Direction predictor table size
    #[serde(default = "PipelineConfig::default_predictor_entries")]
    pub predictor_entries: usize,

    /// Branch Target Buffer size
    #[serde(default = "PipelineConfig::default_btb_entries")]
    pub btb_entries: usize,
}

impl PipelineConfig {
    /// Returns the default direction predictor table size.
    fn default_predictor_entries() -> usize {
        defaults::PREDICTOR_ENTRIES
    }

    /// Returns the default Branch Target Buffer size.
    fn default_btb_entries() -> usize {
        defaults::BTB_ENTRIES
    }
}

impl Default for PipelineConfig {
    /// Creates a default pipeline configuration.
    ///
    /// Speculation off, forwarding on, static not-taken prediction.
    fn default() -> Self {
        Self {
            speculation: Speculation::default(),
            forwarding: Forwarding::default(),
            branch_predictor: BranchPredictor::default(),
            predictor_entries: defaults::PREDICTOR_ENTRIES,
            btb_entries: defaults::BTB_ENTRIES,
        }
    }
}

/// Data cache geometry.
///
/// Validated when the cache is built: the block size must be a power-of-two
/// multiple of the word size, and both the way count and the derived set count
/// must be powers of two.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total cache capacity in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Block size in bytes
    #[serde(default = "CacheConfig::default_block")]
    pub block_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,
}

impl CacheConfig {
    /// Returns the default cache capacity in bytes.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache block size in bytes.
    fn default_block() -> usize {
        defaults::CACHE_BLOCK
    }

    /// Returns the default cache associativity.
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            block_bytes: defaults::CACHE_BLOCK,
            ways: defaults::CACHE_WAYS,
        }
    }
}

/// Backing store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Memory size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: u64,

    /// Block fetch latency in ticks
    #[serde(default = "MemoryConfig::default_latency")]
    pub latency: u64,

    /// Bytes reserved for the code segment at the bottom of memory
    #[serde(default = "MemoryConfig::default_code_segment")]
    pub code_segment_bytes: u64,
}

impl MemoryConfig {
    /// Returns the default memory size in bytes.
    fn default_size() -> u64 {
        defaults::MEMORY_SIZE
    }

    /// Returns the default block fetch latency.
    fn default_latency() -> u64 {
        defaults::MEMORY_LATENCY
    }

    /// Returns the default code segment size.
    fn default_code_segment() -> u64 {
        defaults::CODE_SEGMENT_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
            latency: defaults::MEMORY_LATENCY,
            code_segment_bytes: defaults::CODE_SEGMENT_SIZE,
        }
    }
}
