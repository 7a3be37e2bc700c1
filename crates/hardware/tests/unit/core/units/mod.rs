/// Functional unit arithmetic and occupancy.
pub mod alu;

/// Direction predictors, BTB and the combined branch unit.
pub mod bru;
