/// Program text parsing and label resolution.
pub mod loader;

/// Register and memory initial-state files.
pub mod state;
