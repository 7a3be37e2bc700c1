//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that direction predictors
//! implement. Target prediction is handled separately by the
//! [`Btb`](super::btb::Btb).

/// Trait for branch direction prediction algorithms.
pub trait BranchPredictor {
    /// Predicts whether the conditional branch at `pc` will be taken.
    fn is_taken(&self, pc: u64) -> bool;

    /// Trains the predictor with the resolved direction of the branch at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    fn update(&mut self, pc: u64, taken: bool);
}
