//! Functional Unit Tests.
//!
//! Opcode semantics through `Alu::execute`, and the occupancy and
//! forwarding behaviour of `FunctionalUnit`.

use pipesim_core::core::units::alu::{Alu, FunctionalUnit};
use pipesim_core::isa::Opcode;
use rstest::rstest;

use crate::common::builder::InstructionBuilder;

#[rstest]
#[case(Opcode::Add, 5, 7, 12)]
#[case(Opcode::Sub, 5, 7, -2)]
#[case(Opcode::Mul, -3, 7, -21)]
#[case(Opcode::Div, -21, 4, -5)]
#[case(Opcode::Divu, -1, 2, i64::MAX)]
#[case(Opcode::Rem, -21, 4, -1)]
#[case(Opcode::Remu, 21, 4, 1)]
#[case(Opcode::And, 0b1100, 0b1010, 0b1000)]
#[case(Opcode::Or, 0b1100, 0b1010, 0b1110)]
#[case(Opcode::Xor, 0b1100, 0b1010, 0b0110)]
#[case(Opcode::Sll, 3, 4, 48)]
#[case(Opcode::Srl, -1, 63, 1)]
#[case(Opcode::Sra, -64, 3, -8)]
#[case(Opcode::Addi, i64::MAX, 1, i64::MIN)]
#[case(Opcode::Slli, 1, 64, 1)]
fn register_results(#[case] op: Opcode, #[case] a: i64, #[case] b: i64, #[case] expected: i64) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

#[rstest]
#[case(Opcode::Div, 42, 42)]
#[case(Opcode::Divu, 42, 42)]
#[case(Opcode::Rem, 42, 0)]
#[case(Opcode::Remu, 42, 0)]
fn division_by_zero_is_defined(#[case] op: Opcode, #[case] a: i64, #[case] expected: i64) {
    assert_eq!(Alu::execute(op, a, 0), expected);
}

#[rstest]
#[case(Opcode::Beq, 3, 3, true)]
#[case(Opcode::Beq, 3, 4, false)]
#[case(Opcode::Bne, 3, 4, true)]
#[case(Opcode::Blt, -1, 0, true)]
#[case(Opcode::Blt, 0, 0, false)]
#[case(Opcode::Bge, 0, 0, true)]
#[case(Opcode::Bge, -5, 0, false)]
fn branch_conditions(#[case] op: Opcode, #[case] a: i64, #[case] b: i64, #[case] taken: bool) {
    assert_eq!(Alu::branch_taken(op, a, b), taken);
}

#[test]
fn single_cycle_result_is_ready_the_same_tick() {
    let mut fu = FunctionalUnit::new();
    let inst = InstructionBuilder::new(Opcode::Add).rd(3).operands(5, 7).build();
    fu.run(inst, 10);
    assert!(!fu.is_free());
    let out = fu.get_output(10, true).unwrap();
    assert_eq!(out.rd_val, 12);
    assert!(out.rd_ready);
    assert!(fu.is_free());
}

#[test]
fn multiply_occupies_two_cycles() {
    let mut fu = FunctionalUnit::new();
    let inst = InstructionBuilder::new(Opcode::Mul).rd(3).operands(6, 7).build();
    fu.run(inst, 10);
    assert!(fu.get_output(10, true).is_none());
    assert_eq!(fu.get_output(11, true).map(|i| i.rd_val), Some(42));
}

#[test]
fn forwarding_policy_controls_readiness() {
    let mut fu = FunctionalUnit::new();
    fu.run(InstructionBuilder::new(Opcode::Addi).rd(1).imm(4).build(), 1);
    assert!(!fu.get_output(1, false).unwrap().rd_ready);

    // A load's value only exists after the memory stage.
    fu.run(InstructionBuilder::new(Opcode::Ld).rd(1).imm(8).operands(1024, 0).build(), 2);
    let ld = fu.get_output(2, true).unwrap();
    assert!(!ld.rd_ready);
    assert_eq!(ld.memory_addr, 1032);
}

#[test]
fn control_flow_results() {
    let mut fu = FunctionalUnit::new();
    fu.run(InstructionBuilder::new(Opcode::Jal).pc(16).rd(1).imm(-4).build(), 1);
    assert_eq!(fu.get_output(1, true).map(|i| i.rd_val), Some(20));

    fu.run(
        InstructionBuilder::new(Opcode::Bne).pc(16).imm(-4).operands(1, 2).build(),
        2,
    );
    assert_eq!(fu.get_output(2, true).and_then(|i| i.branch_target), Some(8));

    fu.run(
        InstructionBuilder::new(Opcode::Beq).pc(16).imm(-4).operands(1, 2).build(),
        3,
    );
    assert_eq!(fu.get_output(3, true).and_then(|i| i.branch_target), Some(20));

    fu.run(InstructionBuilder::new(Opcode::Lui).rd(2).imm(3).build(), 4);
    assert_eq!(fu.get_output(4, true).map(|i| i.rd_val), Some(3 << 20));
}

#[test]
fn flush_discards_running_instruction() {
    let mut fu = FunctionalUnit::new();
    fu.run(InstructionBuilder::new(Opcode::Div).rd(1).build(), 1);
    assert!(fu.flush().is_some());
    assert!(fu.is_free());
    assert!(fu.get_output(2, true).is_none());
}
