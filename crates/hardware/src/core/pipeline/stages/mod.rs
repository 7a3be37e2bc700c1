//! Pipeline stage implementations.
//!
//! Each stage is a free function over the [`Cpu`](crate::core::Cpu); the
//! controller calls them back to front every tick:
//! 1. **Fetch:** Retrieves instructions from the instruction source at the PC.
//! 2. **Decode:** Resolves operands and hazards, and redirects unconditional jumps.
//! 3. **Execute:** Runs the functional unit.
//! 4. **Memory:** Handles data load and store operations through the cache.
//! 5. **Writeback:** Commits results and resolves conditional branches.

/// ID: operand read, hazard stalls, jump redirect.
pub mod decode;

/// EX: functional unit issue and completion.
pub mod execute;

/// IF: instruction fetch and prediction.
pub mod fetch;

/// MEM: cache access.
pub mod memory;

/// WB: retirement and branch resolution.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
