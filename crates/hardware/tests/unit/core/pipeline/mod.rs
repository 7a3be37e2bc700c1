/// Hazard detection, forwarding and commit rules.
pub mod hazards;

/// Single-slot inter-stage latches.
pub mod latches;
