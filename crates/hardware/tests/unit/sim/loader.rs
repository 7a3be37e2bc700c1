//! Program Loader Tests.
//!
//! Every malformed program is rejected with the first offending line.

use std::io::Write;

use pipesim_core::common::{LoadError, SimError};
use pipesim_core::isa::{InstructionSource, Opcode};
use pipesim_core::sim::loader::{load_program, parse_program};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

const CODE_SEGMENT: u64 = 1024;

fn parse_err(text: &str) -> LoadError {
    parse_program(text, CODE_SEGMENT).unwrap_err()
}

#[rstest]
#[case("add x1, x2", "add x1, x2")]
#[case("ld x1, 8", "ld x1, 8")]
#[case("jal x1", "jal x1")]
#[case("lui x1, 2, 3", "lui x1, 2, 3")]
#[case("nop x1", "nop x1")]
#[case("SUB X1, X2   # trailing", "sub x1, x2")]
fn wrong_operand_count_is_incomplete(#[case] line: &str, #[case] text: &str) {
    assert_eq!(
        parse_err(line),
        LoadError::IncompleteInstruction {
            text: text.to_string(),
            line: 1
        }
    );
}

#[rstest]
#[case("add x1, x2, 5")]
#[case("add x1, x2, x32")]
#[case("addi x1, x0, x2")]
#[case("ld x1, x0(x2)")]
#[case("sd x1, 8(a0)")]
#[case("lui 5, x1")]
fn wrong_operand_kind_is_invalid_format(#[case] line: &str) {
    assert!(matches!(
        parse_err(line),
        LoadError::InvalidFormat { line: 1, .. }
    ));
}

#[rstest]
#[case("addi x1, x0, 2048")]
#[case("addi x1, x0, -2049")]
#[case("sd x1, 4096(x2)")]
#[case("lui x1, 524288")]
#[case("addi x1, x0, 99999999999999999999")]
fn immediate_out_of_range(#[case] line: &str) {
    assert!(matches!(
        parse_err(line),
        LoadError::ImmediateOutOfRange { line: 1, .. }
    ));
}

#[test]
fn immediates_at_the_field_limits_are_accepted() {
    let program = parse_program(
        "addi x1, x0, 2047\naddi x1, x0, -2048\nlui x2, 524287\nlui x2, -524288\n",
        CODE_SEGMENT,
    )
    .unwrap();
    let imms: Vec<_> = program.instructions().iter().map(|i| i.imm).collect();
    assert_eq!(imms, vec![2047, -2048, 524287, -524288]);
}

#[test]
fn errors_carry_the_source_line() {
    let text = "# header\n\naddi x1, x0, 1\n\n  frob x1, x2\n";
    assert_eq!(
        parse_err(text),
        LoadError::UnknownOpcode {
            opcode: "frob".into(),
            line: 5
        }
    );
    assert_eq!(
        parse_err(text).to_string(),
        "unknown opcode frob at line #5"
    );
}

#[test]
fn unknown_label_is_reported_at_its_use() {
    assert_eq!(
        parse_err("top: nop\nbeq x1, x2, bottom\n"),
        LoadError::UnknownLabel {
            label: "bottom".into(),
            line: 2
        }
    );
}

#[test]
fn forward_and_backward_labels_resolve_to_half_word_offsets() {
    let program = parse_program(
        "
        top:    beq x1, x2, done
                addi x1, x1, 1
                jal x0, top
        done:   nop
        ",
        CODE_SEGMENT,
    )
    .unwrap();
    // beq at 4 -> 16, jal at 12 -> 4
    assert_eq!(program.read(4).unwrap().imm, 6);
    assert_eq!(program.read(12).unwrap().imm, -4);
}

#[test]
fn labels_are_case_insensitive_and_first_definition_wins() {
    let program = parse_program(
        "Again: nop\nagain: nop\nJAL x0, AGAIN\n",
        CODE_SEGMENT,
    )
    .unwrap();
    let jal = program.read(12).unwrap();
    assert_eq!(jal.opcode, Opcode::Jal);
    assert_eq!(jal.imm, -4);
}

/// `far` at PC 4, 1024 filler instructions, then the jump at PC 4104.
fn far_jump(jump: &str) -> String {
    let mut text = String::from("far: nop\n");
    text.push_str(&"nop\n".repeat(1024));
    text.push_str(jump);
    text
}

#[test]
fn branch_offset_must_fit_twelve_bits() {
    assert_eq!(
        parse_program(&far_jump("beq x0, x0, far\n"), 8192).unwrap_err(),
        LoadError::BranchTooFar {
            label: "far".into(),
            line: 1026
        }
    );
}

#[test]
fn jump_offset_has_twenty_bits() {
    let program = parse_program(&far_jump("jal x0, far\n"), 8192).unwrap();
    assert_eq!(program.read(4104).unwrap().imm, -2050);
}

#[test]
fn program_must_fit_below_the_code_segment() {
    let text = "nop\nnop\n# filler\nnop\nnop\n";
    assert_eq!(
        parse_program(text, 16).unwrap_err(),
        LoadError::ProgramTooLarge { line: 5 }
    );
    assert_eq!(parse_program("nop\nnop\nnop\n", 16).unwrap().instructions().len(), 3);
}

#[test]
fn empty_program_has_no_instructions() {
    let program = parse_program("# nothing\n\n   \n", CODE_SEGMENT).unwrap();
    assert!(program.instructions().is_empty());
    assert!(program.read(4).is_none());
}

#[test]
fn loads_program_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "addi x1, x0, 3").unwrap();
    writeln!(file, "sd x1, 1024(x0)").unwrap();

    let program = load_program(file.path(), CODE_SEGMENT).unwrap();
    assert_eq!(program.instructions().len(), 2);
    assert_eq!(program.read(8).unwrap().to_string(), "sd x1, 1024(x0)");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.s");
    let err = load_program(&path, CODE_SEGMENT).unwrap_err();
    assert!(matches!(err, SimError::Io { path: p, .. } if p == path));
}

#[test]
fn parse_errors_surface_as_load_errors() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bogus").unwrap();
    assert!(matches!(
        load_program(file.path(), CODE_SEGMENT),
        Err(SimError::Load(LoadError::UnknownOpcode { line: 1, .. }))
    ));
}
