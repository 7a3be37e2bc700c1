//! Simulator error definitions.
//!
//! This module defines the fatal error taxonomy for the simulator. It provides:
//! 1. **Model Errors:** Invalid cache/memory geometry and illegal memory accesses.
//! 2. **Load Errors:** Malformed program text and initial-state files, tagged with line numbers.
//! 3. **Error Handling:** Integration with standard Rust error traits through `thiserror`.
//!
//! Every variant here is fatal: it describes an invalid model configuration,
//! not a condition the pipeline recovers from. Arithmetic edge cases such as
//! division by zero are defined results and never surface as errors.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SimError> = std::result::Result<T, E>;

/// Fatal simulator errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// Cache block size is not a power-of-two multiple of the word size.
    #[error("cache block size {0} must be a power-of-two multiple of a doubleword")]
    InvalidBlockSize(usize),

    /// Cache associativity is not a power of two.
    #[error("number of cache ways {0} must be a power of two")]
    NonPowerOfTwoWays(usize),

    /// Derived cache set count is not a power of two.
    #[error("number of cache sets {0} must be a power of two")]
    NonPowerOfTwoSets(usize),

    /// Backing store size is not a multiple of the word size.
    #[error("memory size {0} must be a multiple of a doubleword")]
    InvalidMemorySize(u64),

    /// Backing store is smaller than the minimum supported size.
    #[error("memory size {size} is below the minimum of {min} bytes")]
    MemoryTooSmall {
        /// Requested size in bytes.
        size: u64,
        /// Minimum supported size in bytes.
        min: u64,
    },

    /// A data access was not aligned to the word size.
    #[error("invalid alignment of memory address {0}")]
    MisalignedAddress(u64),

    /// A data access fell outside the backing store.
    #[error("memory address {0} is out of bounds")]
    AddressOutOfBounds(u64),

    /// A data access targeted the reserved code segment.
    #[error("memory address {0} is in the code segment")]
    CodeSegmentAccess(u64),

    /// The run exceeded the configured cycle limit.
    #[error("simulation exceeded the limit of {0} cycles")]
    CycleLimitExceeded(u64),

    /// The JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program or an initial-state file is malformed.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Errors raised while parsing a program or an initial-state file.
///
/// Line numbers are 1-based and refer to the source text being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The mnemonic does not name a supported opcode.
    #[error("unknown opcode {opcode} at line #{line}")]
    UnknownOpcode {
        /// Offending mnemonic.
        opcode: String,
        /// Source line.
        line: usize,
    },

    /// The instruction has the wrong number of operands.
    #[error("incomplete instruction: {text} at line #{line}")]
    IncompleteInstruction {
        /// Instruction text.
        text: String,
        /// Source line.
        line: usize,
    },

    /// An operand is not a register or integer where one is required.
    #[error("invalid instruction format: {text} at line #{line}")]
    InvalidFormat {
        /// Instruction text.
        text: String,
        /// Source line.
        line: usize,
    },

    /// An immediate does not fit the instruction's encoding.
    #[error("invalid immediate value: {text} at line #{line}")]
    ImmediateOutOfRange {
        /// Instruction text.
        text: String,
        /// Source line.
        line: usize,
    },

    /// A branch or jump names a label that is never defined.
    #[error("unknown label {label} at line #{line}")]
    UnknownLabel {
        /// Missing label.
        label: String,
        /// Source line.
        line: usize,
    },

    /// A branch or jump target does not fit the offset field.
    #[error("branch target {label} is too far away at line #{line}")]
    BranchTooFar {
        /// Target label.
        label: String,
        /// Source line.
        line: usize,
    },

    /// The program does not fit in the code segment.
    #[error("program size goes out of the code segment at line #{line}")]
    ProgramTooLarge {
        /// Source line of the first instruction that does not fit.
        line: usize,
    },

    /// A register-state line names something other than `x0`-`x31`.
    #[error("invalid register name {name} at line #{line}")]
    InvalidRegisterName {
        /// Offending name.
        name: String,
        /// Source line.
        line: usize,
    },

    /// A register-state line has a missing or non-integer value.
    #[error("invalid register value for {name} at line #{line}")]
    InvalidRegisterValue {
        /// Register name.
        name: String,
        /// Source line.
        line: usize,
    },

    /// A register is assigned twice in the register-state file.
    #[error("redefinition of register state for {name} at line #{line}")]
    RegisterRedefined {
        /// Register name.
        name: String,
        /// Source line.
        line: usize,
    },

    /// A register is never assigned in the register-state file.
    #[error("register state of x{0} is undefined")]
    RegisterUndefined(usize),

    /// A memory-state line is not `address = value`.
    #[error("invalid memory address and/or data {text} at line #{line}")]
    InvalidMemoryEntry {
        /// Line text.
        text: String,
        /// Source line.
        line: usize,
    },

    /// A memory-state address is not word aligned.
    #[error("invalid alignment of memory address {addr} at line #{line}")]
    MisalignedMemoryEntry {
        /// Offending address.
        addr: u64,
        /// Source line.
        line: usize,
    },

    /// A memory-state address lies outside the backing store.
    #[error("memory address {addr} is out of bounds at line #{line}")]
    MemoryEntryOutOfBounds {
        /// Offending address.
        addr: u64,
        /// Source line.
        line: usize,
    },

    /// A memory-state address lies in the reserved code segment.
    #[error("memory address {addr} is reserved for the code segment at line #{line}")]
    MemoryEntryInCodeSegment {
        /// Offending address.
        addr: u64,
        /// Source line.
        line: usize,
    },

    /// Two different values are assigned to the same memory word.
    #[error("memory address {addr} has multiple values defined at line #{line}")]
    MemoryRedefined {
        /// Offending address.
        addr: u64,
        /// Source line.
        line: usize,
    },
}
