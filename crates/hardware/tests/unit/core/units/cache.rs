//! Cache Tests.
//!
//! Verifies lookup, FIFO victim order, dirty write-back hand-off, invalidation and flush.

use mipsim_core::core::units::cache::{Cache, WriteBack};
use pretty_assertions::assert_eq;

#[test]
fn zero_capacity_is_raised_to_one() {
    let cache = Cache::new(0);
    assert_eq!(cache.capacity(), 1);
    assert!(cache.is_empty());
}

#[test]
fn installed_lines_are_found() {
    let mut cache = Cache::new(4);
    assert_eq!(cache.install(10, 0xAA, false), None);
    assert_eq!(cache.lookup(10), Some(0xAA));
    assert!(cache.contains(10));
    assert!(!cache.contains(11));
    assert_eq!(cache.len(), 1);
}

#[test]
fn evicts_in_insertion_order() {
    let mut cache = Cache::new(2);
    let _ = cache.install(1, 1, false);
    let _ = cache.install(2, 2, false);
    // Touching line 1 does not refresh it.
    assert_eq!(cache.lookup(1), Some(1));
    let _ = cache.install(3, 3, false);
    assert!(!cache.contains(1));
    assert!(cache.contains(2));
    assert!(cache.contains(3));

    let _ = cache.install(4, 4, false);
    assert!(!cache.contains(2));
    assert_eq!(cache.len(), 2);
}

#[test]
fn dirty_victim_is_returned_for_write_back() {
    let mut cache = Cache::new(1);
    let _ = cache.install(7, 0, false);
    assert!(cache.write_hit(7, 99));
    assert!(cache.is_dirty(7));

    let wb = cache.install(8, 5, false);
    assert_eq!(wb, Some(WriteBack { addr: 7, data: 99 }));
}

#[test]
fn clean_victim_is_dropped_silently() {
    let mut cache = Cache::new(1);
    let _ = cache.install(7, 1, false);
    assert_eq!(cache.install(8, 2, false), None);
}

#[test]
fn write_miss_writes_nothing() {
    let mut cache = Cache::new(2);
    assert!(!cache.write_hit(3, 1));
    assert!(cache.is_empty());
}

#[test]
fn reinstalling_an_address_keeps_its_dirty_bit() {
    let mut cache = Cache::new(2);
    let _ = cache.install(5, 1, true);
    assert_eq!(cache.install(5, 2, false), None);
    assert_eq!(cache.lookup(5), Some(2));
    assert!(cache.is_dirty(5));
    assert_eq!(cache.len(), 1);
}

#[test]
fn invalidate_hands_back_dirty_data() {
    let mut cache = Cache::new(2);
    let _ = cache.install(5, 1, true);
    let _ = cache.install(6, 2, false);
    assert_eq!(cache.invalidate(5), Some(WriteBack { addr: 5, data: 1 }));
    assert_eq!(cache.invalidate(6), None);
    assert_eq!(cache.invalidate(6), None);
    assert!(cache.is_empty());
}

#[test]
fn flush_cleans_every_dirty_line_once() {
    let mut cache = Cache::new(4);
    let _ = cache.install(1, 10, true);
    let _ = cache.install(2, 20, false);
    let _ = cache.install(3, 30, true);

    let dirty = cache.flush();
    assert_eq!(
        dirty,
        vec![WriteBack { addr: 1, data: 10 }, WriteBack { addr: 3, data: 30 }]
    );
    assert!(!cache.is_dirty(1));
    assert_eq!(cache.lookup(1), Some(10));
    assert!(cache.flush().is_empty());
}
