//! Pipeline Latch Tests.

use pipesim_core::core::pipeline::latches::Latches;
use pipesim_core::isa::Opcode;

use crate::common::builder::{InstructionBuilder, add};

#[test]
fn flush_counts_discarded_instructions() {
    let mut latches = Latches::default();
    assert!(latches.all_free());

    latches.if_id.write(add(1, 1, 0, 0));
    latches.ex_mem.write(InstructionBuilder::new(Opcode::Nop).tag(2).build());
    assert!(!latches.all_free());
    assert_eq!(latches.ex_mem.peek().map(|i| i.tag.0), Some(2));

    assert_eq!(latches.flush(), 2);
    assert!(latches.all_free());
    assert_eq!(latches.flush(), 0);
}

#[test]
fn take_moves_the_instruction_out() {
    let mut latches = Latches::default();
    latches.id_ex.write(add(4, 2, 1, 1));
    let inst = latches.id_ex.take();
    assert_eq!(inst.map(|i| i.rd), Some(2));
    assert!(latches.id_ex.is_free());
    assert!(latches.id_ex.take().is_none());
}
