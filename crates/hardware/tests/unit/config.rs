//! Configuration Tests.
//!
//! JSON parsing with per-field defaults, policy enums, and the validation
//! performed by the components that consume each section.

use pipesim_core::Simulator;
use pipesim_core::common::SimError;
use pipesim_core::config::{BranchPredictor, Config, Forwarding, Speculation};
use pipesim_core::isa::InstructionMemory;

#[test]
fn empty_object_yields_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.pipeline.speculation, Speculation::Disabled);
    assert_eq!(config.pipeline.forwarding, Forwarding::Enabled);
    assert_eq!(config.pipeline.branch_predictor, BranchPredictor::Static);
    assert_eq!(config.pipeline.predictor_entries, 16);
    assert_eq!(config.pipeline.btb_entries, 16);
    assert_eq!(config.cache.size_bytes, 1024);
    assert_eq!(config.cache.block_bytes, 8);
    assert_eq!(config.cache.ways, 1);
    assert_eq!(config.memory.size_bytes, 4096);
    assert_eq!(config.memory.latency, 0);
    assert_eq!(config.memory.code_segment_bytes, 1024);
    assert_eq!(config.general.max_cycles, None);
    assert!(!config.general.trace);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = Config::from_json(
        r#"{ "general": { "max_cycles": 500 }, "pipeline": { "forwarding": "Disabled" } }"#,
    )
    .unwrap();
    assert_eq!(config.general.max_cycles, Some(500));
    assert_eq!(config.pipeline.forwarding, Forwarding::Disabled);
    assert_eq!(config.pipeline.speculation, Speculation::Disabled);
}

#[test]
fn unknown_policy_is_rejected() {
    let err = Config::from_json(r#"{ "pipeline": { "branch_predictor": "Tage" } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn invalid_geometry_fails_at_construction() {
    let mut config = Config::default();
    config.cache.ways = 3;
    let err = Simulator::new(&config, InstructionMemory::default()).unwrap_err();
    assert!(matches!(err, SimError::NonPowerOfTwoWays(3)));

    let mut config = Config::default();
    config.memory.size_bytes = 1024;
    let err = Simulator::new(&config, InstructionMemory::default()).unwrap_err();
    assert!(matches!(err, SimError::MemoryTooSmall { size: 1024, .. }));

    let mut config = Config::default();
    config.memory.size_bytes = 4100;
    let err = Simulator::new(&config, InstructionMemory::default()).unwrap_err();
    assert!(matches!(err, SimError::InvalidMemorySize(4100)));
}
