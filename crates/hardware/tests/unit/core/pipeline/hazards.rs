//! Register File Dependency Tests.
//!
//! Verifies the last-writer table: stalls on unpublished producers,
//! forwarding of published values, tag-checked commits and flush.

use pipesim_core::core::pipeline::hazards::RegisterFile;
use pipesim_core::isa::{InstTag, Opcode};

use crate::common::builder::{InstructionBuilder, add};

#[test]
fn independent_instruction_reads_committed_values() {
    let mut rf = RegisterFile::new();
    rf.set(1, 10);
    rf.set(2, 20);
    let mut inst = add(1, 3, 1, 2);
    assert!(!rf.dep_check(&mut inst));
    assert_eq!((inst.rs1_val, inst.rs2_val), (10, 20));
    assert_eq!(rf.producer(3).map(|p| p.tag), Some(InstTag(1)));
}

#[test]
fn consumer_stalls_until_producer_publishes() {
    let mut rf = RegisterFile::new();
    let mut producer = add(1, 5, 0, 0);
    assert!(!rf.dep_check(&mut producer));

    let mut consumer = add(2, 6, 5, 5);
    assert!(rf.dep_check(&mut consumer));
    // A stalled consumer does not claim its destination.
    assert!(rf.producer(6).is_none());

    rf.publish(InstTag(1), 5, 99);
    assert!(!rf.dep_check(&mut consumer));
    assert_eq!((consumer.rs1_val, consumer.rs2_val), (99, 99));
}

#[test]
fn youngest_writer_wins_and_older_commit_keeps_entry() {
    let mut rf = RegisterFile::new();
    let mut older = add(1, 7, 0, 0);
    let mut younger = add(2, 7, 0, 0);
    assert!(!rf.dep_check(&mut older));
    assert!(!rf.dep_check(&mut younger));

    // Publishing under a displaced tag is ignored.
    rf.publish(InstTag(1), 7, 1);
    assert_eq!(rf.producer(7).and_then(|p| p.value), None);

    rf.write(InstTag(1), 7, 1);
    assert_eq!(rf.read(7), 1);
    assert_eq!(rf.producer(7).map(|p| p.tag), Some(InstTag(2)));

    rf.write(InstTag(2), 7, 2);
    assert_eq!(rf.read(7), 2);
    assert!(rf.is_clear());
}

#[test]
fn x0_is_never_a_dependency() {
    let mut rf = RegisterFile::new();
    let mut writes_x0 = add(1, 0, 0, 0);
    assert!(!rf.dep_check(&mut writes_x0));
    assert!(rf.is_clear());

    let mut reads_x0 = add(2, 1, 0, 0);
    assert!(!rf.dep_check(&mut reads_x0));
    assert_eq!(reads_x0.rs1_val, 0);
}

#[test]
fn store_claims_no_destination() {
    let mut rf = RegisterFile::new();
    let mut sd = InstructionBuilder::new(Opcode::Sd)
        .tag(1)
        .rs1(2)
        .rs2(3)
        .build();
    assert!(!rf.dep_check(&mut sd));
    assert!(rf.is_clear());
}

#[test]
fn flush_drops_every_producer() {
    let mut rf = RegisterFile::new();
    for (tag, rd) in [(1, 1), (2, 2), (3, 31)] {
        let mut inst = add(tag, rd, 0, 0);
        assert!(!rf.dep_check(&mut inst));
    }
    assert!(!rf.is_clear());
    rf.flush();
    assert!(rf.is_clear());
    rf.flush();
    assert!(rf.is_clear());
}
