//! Backing Store Tests.

use pipesim_core::common::SimError;
use pipesim_core::config::MemoryConfig;
use pipesim_core::soc::memory::DataMemory;
use pipesim_core::soc::memory::buffer::WordBuffer;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn memory(latency: u64) -> DataMemory {
    DataMemory::new(&MemoryConfig {
        latency,
        ..MemoryConfig::default()
    })
    .unwrap()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(7)]
fn block_arrives_exactly_latency_ticks_later(#[case] latency: u64) {
    let mut mem = memory(latency);
    mem.load_block(2048, 8, 100).unwrap();
    for tick in 100..100 + latency {
        assert!(mem.run(tick).is_none(), "early response at tick {tick}");
    }
    assert!(mem.run(100 + latency).is_some());
    assert!(mem.run(101 + latency).is_none());
}

#[test]
fn response_reflects_contents_at_delivery() {
    let mut mem = memory(2);
    mem.load_block(1024, 8, 0).unwrap();
    mem.write_block(1024, &[5]);
    assert_eq!(mem.run(2).unwrap().data, vec![5]);
}

#[test]
fn write_back_does_not_mark_words_accessed() {
    let mut mem = memory(0);
    mem.write_block(1024, &[1, 2]);
    assert_eq!(mem.accessed_words().count(), 0);
    assert_eq!(mem.load(1032).unwrap(), 2);
    assert_eq!(mem.to_string(), "");
}

#[test]
fn last_word_of_memory_is_addressable() {
    let mut mem = memory(0);
    mem.store(4088, -1).unwrap();
    assert_eq!(mem.load(4088).unwrap(), -1);
    assert!(matches!(
        mem.check_range(4088, 16),
        Err(SimError::AddressOutOfBounds(4088))
    ));
    assert!(matches!(
        mem.check_range(u64::MAX - 7, 8),
        Err(SimError::AddressOutOfBounds(_))
    ));
}

#[test]
fn code_segment_boundary() {
    let mem = memory(0);
    assert!(matches!(
        mem.load(1016),
        Err(SimError::CodeSegmentAccess(1016))
    ));
    assert_eq!(mem.load(1024).unwrap(), 0);
}

#[test]
fn custom_geometry() {
    let mem = DataMemory::new(&MemoryConfig {
        size_bytes: 8192,
        latency: 0,
        code_segment_bytes: 2048,
    })
    .unwrap();
    assert_eq!(mem.size(), 8192);
    assert_eq!(mem.code_segment(), 2048);
    assert!(mem.load(8184).is_ok());
    assert!(mem.load(1024).is_err());
}

#[test]
fn word_buffer_tracks_len_and_ignores_out_of_range_writes() {
    let mut buf = WordBuffer::new(4);
    assert_eq!(buf.len(), 4);
    assert!(!buf.is_empty());
    buf.set(4, 9);
    assert_eq!(buf.get(4), None);
    buf.mark_accessed(3, 2);
    assert_eq!(buf.accessed().count(), 0);
}
