//! Memory controller latency model.
//!
//! The backing store asks its controller how many ticks a block fetch takes.
//! Only the fixed-latency [`SimpleController`] is modeled; the trait keeps
//! the data memory independent of the timing policy.

/// Trait for memory controller implementations that report access latency in ticks.
pub trait MemoryController: std::fmt::Debug {
    /// Returns the number of ticks before a block fetch of `addr` responds.
    ///
    /// # Arguments
    ///
    /// * `addr` - Block address being fetched.
    fn access_latency(&mut self, addr: u64) -> u64;
}

/// Fixed-latency memory controller; every access takes the same number of ticks.
#[derive(Debug, Clone, Copy)]
pub struct SimpleController {
    latency: u64,
}

impl SimpleController {
    /// Creates a simple controller with the given fixed latency in ticks.
    pub const fn new(latency: u64) -> Self {
        Self { latency }
    }
}

impl MemoryController for SimpleController {
    fn access_latency(&mut self, _addr: u64) -> u64 {
        self.latency
    }
}
