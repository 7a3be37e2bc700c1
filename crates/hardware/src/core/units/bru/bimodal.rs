//! Bimodal Branch Predictor.
//!
//! A table of 2-bit saturating counters indexed by the word address of the
//! branch. Counters start weakly not-taken; values 2 and 3 predict taken.

use super::BranchPredictor;

/// Counter value that begins predicting taken.
const TAKEN_THRESHOLD: u8 = 2;

/// Saturation limit of a 2-bit counter.
const COUNTER_MAX: u8 = 3;

/// Initial counter value (weakly not-taken).
const WEAKLY_NOT_TAKEN: u8 = 1;

/// Per-PC 2-bit counter predictor.
#[derive(Debug, Clone)]
pub struct BimodalPredictor {
    counters: Vec<u8>,
}

impl BimodalPredictor {
    /// Creates a predictor with `entries` counters (at least one).
    pub fn new(entries: usize) -> Self {
        Self {
            counters: vec![WEAKLY_NOT_TAKEN; entries.max(1)],
        }
    }

    fn index(&self, pc: u64) -> usize {
        ((pc >> 2) % self.counters.len() as u64) as usize
    }

    /// Returns the raw counter for `pc`.
    pub fn counter(&self, pc: u64) -> u8 {
        self.counters[self.index(pc)]
    }
}

impl BranchPredictor for BimodalPredictor {
    fn is_taken(&self, pc: u64) -> bool {
        self.counter(pc) >= TAKEN_THRESHOLD
    }

    fn update(&mut self, pc: u64, taken: bool) {
        let idx = self.index(pc);
        let ctr = &mut self.counters[idx];
        *ctr = if taken {
            (*ctr + 1).min(COUNTER_MAX)
        } else {
            ctr.saturating_sub(1)
        };
    }
}
