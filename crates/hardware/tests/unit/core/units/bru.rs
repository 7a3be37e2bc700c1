//! Branch Unit Tests.
//!
//! Direction predictors, the BTB, and the combined prediction that fetch
//! consumes.

use pipesim_core::config::{BranchPredictor as BpType, PipelineConfig};
use pipesim_core::core::units::bru::bimodal::BimodalPredictor;
use pipesim_core::core::units::bru::btb::Btb;
use pipesim_core::core::units::bru::static_bp::StaticPredictor;
use pipesim_core::core::units::bru::{BranchPredictor, BranchUnit, Prediction};

fn unit(kind: BpType, entries: usize) -> BranchUnit {
    BranchUnit::new(&PipelineConfig {
        branch_predictor: kind,
        predictor_entries: entries,
        btb_entries: entries,
        ..PipelineConfig::default()
    })
}

#[test]
fn static_predictor_never_learns() {
    let mut bp = StaticPredictor;
    for _ in 0..4 {
        bp.update(0x20, true);
    }
    assert!(!bp.is_taken(0x20));
}

#[test]
fn bimodal_counters_need_two_not_taken_to_flip_back() {
    let mut bp = BimodalPredictor::new(8);
    assert_eq!(bp.counter(0x10), 1);
    bp.update(0x10, true);
    bp.update(0x10, true);
    bp.update(0x10, true);
    assert_eq!(bp.counter(0x10), 3);
    bp.update(0x10, false);
    assert!(bp.is_taken(0x10));
    bp.update(0x10, false);
    assert!(!bp.is_taken(0x10));
}

#[test]
fn bimodal_entries_alias_modulo_table_size() {
    let mut bp = BimodalPredictor::new(4);
    bp.update(0x04, true);
    // (0x14 >> 2) % 4 == (0x04 >> 2) % 4
    assert!(bp.is_taken(0x14));
    assert!(!bp.is_taken(0x08));
}

#[test]
fn btb_is_tagged_by_full_pc() {
    let mut btb = Btb::new(4);
    assert_eq!(btb.get_target(0x04), None);
    btb.update(0x04, 0x40);
    assert_eq!(btb.get_target(0x04), Some(0x40));
    // Same slot, different branch.
    assert_eq!(btb.get_target(0x14), None);
    btb.update(0x14, 0x80);
    assert_eq!(btb.get_target(0x04), None);
}

#[test]
fn zero_sized_tables_still_work() {
    let mut bu = unit(BpType::Bimodal, 0);
    bu.update(0x08, true, 0x40);
    assert_eq!(
        bu.predict(0x08),
        Prediction {
            taken: true,
            target: 0x40
        }
    );
}

#[test]
fn taken_prediction_needs_direction_and_target() {
    let mut bu = unit(BpType::Bimodal, 16);
    let not_taken = Prediction {
        taken: false,
        target: 0x0c,
    };
    assert_eq!(bu.predict(0x08), not_taken);

    // Not-taken outcomes never install a BTB target.
    bu.update(0x08, false, 0x0c);
    assert_eq!(bu.btb().get_target(0x08), None);

    bu.update(0x08, true, 0x40);
    bu.update(0x08, true, 0x40);
    assert_eq!(bu.predict(0x08).target, 0x40);
}

#[test]
fn static_unit_falls_through_even_with_btb_hit() {
    let mut bu = unit(BpType::Static, 16);
    bu.update(0x08, true, 0x40);
    assert_eq!(bu.btb().get_target(0x08), Some(0x40));
    assert_eq!(bu.predict(0x08).target, 0x0c);
}
