//! Initial State Tests.

use std::io::Write;

use pipesim_core::common::{LoadError, NUM_REGS, SimError};
use pipesim_core::config::MemoryConfig;
use pipesim_core::sim::state::{
    apply_memory_state, load_memory_state, load_registers, parse_registers,
};
use pipesim_core::soc::memory::DataMemory;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

/// One `xN = N * 10` line per register.
fn all_registers() -> String {
    (0..NUM_REGS).map(|i| format!("x{i} = {}\n", i * 10)).collect()
}

fn memory() -> DataMemory {
    DataMemory::new(&MemoryConfig::default()).unwrap()
}

#[test]
fn every_register_is_loaded_and_x0_is_zero() {
    let regs = parse_registers(&all_registers()).unwrap();
    assert_eq!(regs[0], 0);
    assert_eq!(regs[1], 10);
    assert_eq!(regs[31], 310);
}

#[test]
fn x0_is_forced_to_zero() {
    let text = all_registers().replacen("x0 = 0", "x0 = 99", 1);
    assert_eq!(parse_registers(&text).unwrap()[0], 0);
}

#[test]
fn register_lines_allow_comments_spacing_and_any_order() {
    let text: String = (0..NUM_REGS)
        .rev()
        .map(|i| format!("  X{i}=-{i}   # reg {i}\n\n"))
        .collect();
    let regs = parse_registers(&text).unwrap();
    assert_eq!(regs[5], -5);
}

#[test]
fn redefined_register_is_rejected() {
    let text = format!("{}x3 = 1\n", all_registers());
    assert_eq!(
        parse_registers(&text),
        Err(LoadError::RegisterRedefined {
            name: "x3".into(),
            line: 33
        })
    );
}

#[rstest]
#[case("x32 = 1", "x32")]
#[case("a0 = 1", "a0")]
#[case("x = 1", "x")]
#[case("x-1 = 1", "x-1")]
fn bad_register_name(#[case] line: &str, #[case] name: &str) {
    assert_eq!(
        parse_registers(line),
        Err(LoadError::InvalidRegisterName {
            name: name.into(),
            line: 1
        })
    );
}

#[rstest]
#[case("x4 = ")]
#[case("x4 = ten")]
#[case("x4 = 1.5")]
#[case("x4 = 99999999999999999999")]
fn bad_register_value(#[case] line: &str) {
    assert_eq!(
        parse_registers(line),
        Err(LoadError::InvalidRegisterValue {
            name: "x4".into(),
            line: 1
        })
    );
}

#[test]
fn memory_entries_are_stored() {
    let mut mem = memory();
    let stored = apply_memory_state("# data\n1024 = 5\n 4088 = -3 \n", &mut mem).unwrap();
    assert_eq!(stored, 2);
    assert_eq!(mem.load(1024).unwrap(), 5);
    assert_eq!(mem.load(4088).unwrap(), -3);
}

#[rstest]
#[case("1028 = 1", LoadError::MisalignedMemoryEntry { addr: 1028, line: 1 })]
#[case("4096 = 1", LoadError::MemoryEntryOutOfBounds { addr: 4096, line: 1 })]
#[case("512 = 1", LoadError::MemoryEntryInCodeSegment { addr: 512, line: 1 })]
#[case("1024", LoadError::InvalidMemoryEntry { text: "1024".into(), line: 1 })]
#[case("-8 = 1", LoadError::InvalidMemoryEntry { text: "-8=1".into(), line: 1 })]
#[case("1024 = x", LoadError::InvalidMemoryEntry { text: "1024=x".into(), line: 1 })]
fn bad_memory_entry(#[case] text: &str, #[case] expected: LoadError) {
    match apply_memory_state(text, &mut memory()) {
        Err(SimError::Load(err)) => assert_eq!(err, expected),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

#[test]
fn alignment_is_checked_before_bounds() {
    assert!(matches!(
        apply_memory_state("4097 = 1", &mut memory()),
        Err(SimError::Load(LoadError::MisalignedMemoryEntry { .. }))
    ));
}

#[test]
fn conflicting_memory_value_is_rejected() {
    assert!(matches!(
        apply_memory_state("1024 = 5\n\n1024 = 6\n", &mut memory()),
        Err(SimError::Load(LoadError::MemoryRedefined {
            addr: 1024,
            line: 3
        }))
    ));
}

#[test]
fn repeating_a_value_or_overwriting_zero_is_allowed() {
    let mut mem = memory();
    let _ = apply_memory_state("1024 = 5\n1024 = 5\n1032 = 0\n1032 = 7\n", &mut mem).unwrap();
    assert_eq!(mem.load(1024).unwrap(), 5);
    assert_eq!(mem.load(1032).unwrap(), 7);
}

#[test]
fn state_files_load_from_disk() {
    let mut regs = NamedTempFile::new().unwrap();
    write!(regs, "{}", all_registers()).unwrap();
    assert_eq!(load_registers(regs.path()).unwrap()[2], 20);

    let mut data = NamedTempFile::new().unwrap();
    writeln!(data, "2048 = 42").unwrap();
    let mut mem = memory();
    assert_eq!(load_memory_state(data.path(), &mut mem).unwrap(), 1);
    assert_eq!(mem.load(2048).unwrap(), 42);
}

#[test]
fn missing_state_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_registers(dir.path().join("reg_state")),
        Err(SimError::Io { .. })
    ));
    assert!(matches!(
        load_memory_state(dir.path().join("memory_state"), &mut memory()),
        Err(SimError::Io { .. })
    ));
}
