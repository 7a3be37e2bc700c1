//! System-on-Chip (SoC) Components.
//!
//! The simulated system has a single memory device: the latency-bearing
//! data store behind the data cache.

/// Backing store and its latency controller.
pub mod memory;
