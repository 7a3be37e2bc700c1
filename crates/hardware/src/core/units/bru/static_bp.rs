//! Static Branch Predictor.
//!
//! Implements the "Always Not Taken" policy. It keeps no state, so training
//! is a no-op and fetch always falls through past a conditional branch.

use super::BranchPredictor;

/// Static not-taken predictor.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPredictor;

impl BranchPredictor for StaticPredictor {
    /// Always predicts not taken.
    fn is_taken(&self, _pc: u64) -> bool {
        false
    }

    fn update(&mut self, _pc: u64, _taken: bool) {}
}
