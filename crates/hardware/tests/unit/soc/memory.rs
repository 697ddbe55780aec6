//! Memory Hierarchy Tests.
//!
//! Verifies tier resolution, per-process accounting, write-back of dirty victims and image
//! loading.

use mipsim_core::common::LoadError;
use mipsim_core::config::MemoryConfig;
use mipsim_core::sim::process::{MemWeights, Pcb, Pid};
use mipsim_core::soc::memory::{MemoryHierarchy, Tier};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn small() -> MemoryHierarchy {
    MemoryHierarchy::new(&MemoryConfig {
        primary_words: 8,
        secondary_words: 8,
        cache_lines: 2,
    })
}

fn pcb() -> Pcb {
    Pcb::new(Pid(1), "mem", 10, 0)
}

#[test]
fn addresses_resolve_to_tiers() {
    let mem = small();
    assert_eq!(mem.boundary(), 8);
    assert_eq!(mem.total_words(), 16);
    assert_eq!(mem.resolve(0), Some((Tier::Primary, 0)));
    assert_eq!(mem.resolve(7), Some((Tier::Primary, 7)));
    assert_eq!(mem.resolve(8), Some((Tier::Secondary, 0)));
    assert_eq!(mem.resolve(15), Some((Tier::Secondary, 7)));
    assert_eq!(mem.resolve(16), None);
}

#[test]
fn miss_then_hit_accounting() {
    let mut mem = small();
    let mut p = pcb();
    mem.load_image(3, &[77]).unwrap();

    assert_eq!(mem.read(3, &mut p), 77);
    assert_eq!(p.stats.cache_misses, 1);
    assert_eq!(p.stats.primary_accesses, 1);
    assert_eq!(p.stats.memory_cycles, 5);

    assert_eq!(mem.read(3, &mut p), 77);
    assert_eq!(p.stats.cache_hits, 1);
    assert_eq!(p.stats.cache_accesses, 1);
    assert_eq!(p.stats.memory_cycles, 6);
    assert_eq!(p.stats.mem_reads, 2);
    assert_eq!(p.stats.mem_accesses_total, 2);
    assert!((p.stats.hit_rate() - 50.0).abs() < f64::EPSILON);
}

#[test]
fn secondary_tier_uses_its_own_weight() {
    let mut mem = small();
    let mut p = pcb().with_weights(MemWeights {
        cache: 2,
        primary: 4,
        secondary: 9,
    });
    let _ = mem.read(12, &mut p);
    assert_eq!(p.stats.secondary_accesses, 1);
    assert_eq!(p.stats.memory_cycles, 9);
}

#[test]
fn writes_stay_in_cache_until_evicted() {
    let mut mem = small();
    let mut p = pcb();
    mem.write(1, 11, &mut p);
    assert!(mem.cache().is_dirty(1));
    assert_eq!(mem.peek(1), 11);

    // Two more lines push address 1 out of a two-line FIFO cache.
    let _ = mem.read(2, &mut p);
    let _ = mem.read(9, &mut p);
    assert!(!mem.cache().contains(1));
    assert_eq!(mem.peek(1), 11);
    // Write allocate (1) + two fills + the dirty victim commit.
    assert_eq!(p.stats.primary_accesses, 3);
    assert_eq!(p.stats.secondary_accesses, 1);
}

#[test]
fn flush_commits_dirty_lines() {
    let mut mem = small();
    let mut p = pcb();
    mem.write(4, 40, &mut p);
    mem.write(10, 100, &mut p);
    assert_eq!(mem.flush(), 2);
    assert_eq!(mem.flush(), 0);
    assert_eq!(mem.peek(4), 40);
    assert_eq!(mem.peek(10), 100);
}

#[test]
fn out_of_range_accesses_are_absorbed() {
    let mut mem = small();
    let mut p = pcb();
    assert_eq!(mem.read(100, &mut p), 0);
    mem.write(100, 5, &mut p);
    assert_eq!(mem.peek(100), 0);
    assert!(mem.cache().is_empty());
    assert_eq!(p.stats.mem_reads, 1);
    assert_eq!(p.stats.mem_writes, 1);
}

#[test]
fn load_image_drops_stale_cache_lines() {
    let mut mem = small();
    let mut p = pcb();
    mem.write(2, 1, &mut p);
    mem.load_image(0, &[5, 6, 7]).unwrap();
    assert!(!mem.cache().contains(2));
    assert_eq!(mem.read(2, &mut p), 7);
}

#[test]
fn load_image_spans_both_tiers() {
    let mut mem = small();
    let words: Vec<u32> = (0..10).collect();
    mem.load_image(4, &words).unwrap();
    assert_eq!(mem.peek(4), 0);
    assert_eq!(mem.peek(13), 9);
}

#[test]
fn oversized_image_is_rejected() {
    let mut mem = small();
    let err = mem.load_image(10, &[0; 7]).unwrap_err();
    assert!(matches!(
        err,
        LoadError::ProgramTooLarge {
            words: 7,
            origin: 10,
            limit: 16
        }
    ));
    assert!(mem.load_image(u32::MAX, &[0]).is_err());
}

proptest! {
    #[test]
    fn every_written_word_reads_back(
        writes in proptest::collection::vec((0u32..16, any::<u32>()), 1..40)
    ) {
        let mut mem = small();
        let mut p = pcb();
        let mut model = [0u32; 16];
        for (addr, val) in &writes {
            mem.write(*addr, *val, &mut p);
            model[*addr as usize] = *val;
        }
        for addr in 0..16u32 {
            prop_assert_eq!(mem.read(addr, &mut p), model[addr as usize]);
        }
        let _ = mem.flush();
        for addr in 0..16u32 {
            prop_assert_eq!(mem.peek(addr), model[addr as usize]);
        }
    }
}
