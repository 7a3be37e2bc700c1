//! Branch prediction unit (BRU).
//!
//! Combines a direction predictor with a Branch Target Buffer. Fetch asks
//! for a [`Prediction`] at each conditional branch; writeback trains both
//! structures with the resolved outcome.

pub use self::branch_predictor::BranchPredictor;

/// Bimodal 2-bit counter predictor.
pub mod bimodal;

/// Branch predictor trait.
pub mod branch_predictor;

/// Branch Target Buffer for storing predicted branch targets.
pub mod btb;

/// Static branch predictor (always not-taken).
pub mod static_bp;

use self::{bimodal::BimodalPredictor, btb::Btb, static_bp::StaticPredictor};
use crate::common::constants::INSTRUCTION_SIZE;
use crate::config::{BranchPredictor as BpType, PipelineConfig};

/// Enum wrapper for static dispatch of direction predictors.
#[derive(Debug, Clone)]
pub enum BranchPredictorWrapper {
    /// Always not-taken.
    Static(StaticPredictor),
    /// 2-bit saturating counters.
    Bimodal(BimodalPredictor),
}

impl BranchPredictorWrapper {
    /// Creates the direction predictor selected by the configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        match config.branch_predictor {
            BpType::Static => Self::Static(StaticPredictor),
            BpType::Bimodal => Self::Bimodal(BimodalPredictor::new(config.predictor_entries)),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn is_taken(&self, pc: u64) -> bool {
        match self {
            Self::Static(bp) => bp.is_taken(pc),
            Self::Bimodal(bp) => bp.is_taken(pc),
        }
    }

    #[inline(always)]
    fn update(&mut self, pc: u64, taken: bool) {
        match self {
            Self::Static(bp) => bp.update(pc, taken),
            Self::Bimodal(bp) => bp.update(pc, taken),
        }
    }
}

/// Fetch-time guess for a conditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    /// Whether the branch is predicted taken.
    pub taken: bool,
    /// The next PC fetch should follow.
    pub target: u64,
}

/// Direction predictor plus BTB.
#[derive(Debug, Clone)]
pub struct BranchUnit {
    predictor: BranchPredictorWrapper,
    btb: Btb,
}

impl BranchUnit {
    /// Builds the unit from pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            predictor: BranchPredictorWrapper::new(config),
            btb: Btb::new(config.btb_entries),
        }
    }

    /// Predicts the next PC after the branch at `pc`.
    ///
    /// A taken prediction needs a BTB hit; without a known target the branch
    /// is predicted not taken.
    pub fn predict(&self, pc: u64) -> Prediction {
        let fall_through = pc.wrapping_add(INSTRUCTION_SIZE);
        match self.btb.get_target(pc) {
            Some(target) if self.predictor.is_taken(pc) => Prediction {
                taken: true,
                target,
            },
            _ => Prediction {
                taken: false,
                target: fall_through,
            },
        }
    }

    /// Trains the direction predictor, and the BTB for taken branches.
    pub fn update(&mut self, pc: u64, taken: bool, target: u64) {
        self.predictor.update(pc, taken);
        if taken {
            self.btb.update(pc, target);
        }
    }

    /// Returns the direction predictor.
    pub const fn predictor(&self) -> &BranchPredictorWrapper {
        &self.predictor
    }

    /// Returns the Branch Target Buffer.
    pub const fn btb(&self) -> &Btb {
        &self.btb
    }
}
