//! # Unit Components
//!
//! Tests organized by crate module: configuration, the pipeline core and its
//! units, the ISA model, the loaders and the backing store.


/// JSON configuration parsing and defaults.
pub mod config;



/// Program loader, initial state and the simulator façade.
pub mod sim;
