//! Cache-Mediated Memory Hierarchy.
//!
//! This module implements the memory seen by the pipeline. It provides:
//! 1. **Tiers:** Two flat backing stores. Addresses below the primary size resolve to primary
//!    store; addresses at or above it resolve to secondary store, rebased by the boundary.
//! 2. **Cache:** A fully associative FIFO cache in front of both tiers, write-back and
//!    write-allocate.
//! 3. **Accounting:** Every access charges its tier's weight and counters to the process
//!    that issued it.
//!
//! A dirty line is committed to its tier inside the same call that evicts it, so cached data
//! is never lost. No operation here ever blocks.

/// Word-addressed backing store.
pub mod buffer;

use tracing::warn;

use self::buffer::BackingStore;
use crate::common::error::LoadError;
use crate::config::MemoryConfig;
use crate::core::units::cache::{Cache, WriteBack};
use crate::sim::process::Pcb;

/// Backing tier an address resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Primary store.
    Primary,
    /// Secondary store.
    Secondary,
}

/// Cache plus primary and secondary stores.
#[derive(Debug)]
pub struct MemoryHierarchy {
    cache: Cache,
    primary: BackingStore,
    secondary: BackingStore,
}

impl MemoryHierarchy {
    /// Builds the hierarchy from its configuration.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            cache: Cache::new(config.cache_lines),
            primary: BackingStore::new(config.primary_words),
            secondary: BackingStore::new(config.secondary_words),
        }
    }

    /// Address boundary between primary and secondary store.
    pub const fn boundary(&self) -> u32 {
        self.primary.len() as u32
    }

    /// Total addressable words.
    pub const fn total_words(&self) -> u32 {
        (self.primary.len() + self.secondary.len()) as u32
    }

    /// The cache, for inspection.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Resolves an address to its tier and rebased offset.
    ///
    /// # Returns
    ///
    /// `None` for addresses beyond both tiers.
    pub fn resolve(&self, addr: u32) -> Option<(Tier, u32)> {
        let boundary = self.boundary();
        if addr < boundary {
            Some((Tier::Primary, addr))
        } else if addr - boundary < self.secondary.len() as u32 {
            Some((Tier::Secondary, addr - boundary))
        } else {
            None
        }
    }

    /// Reads a word through the cache.
    ///
    /// On a hit one cache-tier cycle is charged. On a miss the backing tier's weight and
    /// access counter are charged, the word is read and installed in the cache (evicting the
    /// FIFO victim, written back if dirty).
    ///
    /// # Returns
    ///
    /// The word, or `0` for an address outside both tiers.
    pub fn read(&mut self, addr: u32, pcb: &mut Pcb) -> u32 {
        pcb.stats.mem_reads += 1;
        if let Some(word) = self.cache.lookup(addr) {
            pcb.stats.cache_hits += 1;
            Self::charge_cache(pcb);
            return word;
        }

        let Some((tier, offset)) = self.resolve(addr) else {
            return 0;
        };
        pcb.stats.cache_misses += 1;
        self.fill(addr, tier, offset, pcb)
    }

    /// Writes a word through the cache.
    ///
    /// On a miss the line is first brought in by a read-through (write-allocate). The cached
    /// word is then updated and marked dirty, and one cache-tier cycle is charged. The
    /// backing tier is only written when the dirty line is later evicted or flushed.
    /// Writes outside both tiers are dropped.
    pub fn write(&mut self, addr: u32, val: u32, pcb: &mut Pcb) {
        pcb.stats.mem_writes += 1;
        if self.cache.contains(addr) {
            pcb.stats.cache_hits += 1;
        } else {
            let Some((tier, offset)) = self.resolve(addr) else {
                warn!(pid = %pcb.pid, addr, "write outside memory dropped");
                return;
            };
            pcb.stats.cache_misses += 1;
            let _ = self.fill(addr, tier, offset, pcb);
        }
        let _ = self.cache.write_hit(addr, val);
        Self::charge_cache(pcb);
    }

    /// Reads a word without charging any process or disturbing the cache.
    pub fn peek(&self, addr: u32) -> u32 {
        if let Some(word) = self.cache.lookup(addr) {
            return word;
        }
        match self.resolve(addr) {
            Some((Tier::Primary, offset)) => self.primary.read(offset),
            Some((Tier::Secondary, offset)) => self.secondary.read(offset),
            None => 0,
        }
    }

    /// Copies an image straight into the backing stores, starting at `origin`.
    ///
    /// Cached copies of the overwritten addresses are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ProgramTooLarge`] if the image extends past the last tier.
    pub fn load_image(&mut self, origin: u32, words: &[u32]) -> Result<(), LoadError> {
        let limit = self.total_words();
        let too_large = || LoadError::ProgramTooLarge {
            words: words.len(),
            origin,
            limit,
        };
        let len = u32::try_from(words.len()).map_err(|_| too_large())?;
        if origin.checked_add(len).is_none_or(|end| end > limit) {
            return Err(too_large());
        }
        for (addr, word) in (origin..).zip(words.iter().copied()) {
            let _ = self.cache.invalidate(addr);
            self.store(WriteBack { addr, data: word });
        }
        Ok(())
    }

    /// Commits every dirty cache line to its tier.
    ///
    /// # Returns
    ///
    /// The number of lines written back.
    pub fn flush(&mut self) -> usize {
        let dirty = self.cache.flush();
        let count = dirty.len();
        for wb in dirty {
            self.store(wb);
        }
        count
    }

    /// Charges one cache-tier access.
    fn charge_cache(pcb: &mut Pcb) {
        pcb.stats.cache_accesses += 1;
        pcb.stats.mem_accesses_total += 1;
        pcb.stats.memory_cycles += pcb.weights.cache;
    }

    /// Charges one backing-tier access.
    fn charge_tier(tier: Tier, pcb: &mut Pcb) {
        match tier {
            Tier::Primary => {
                pcb.stats.primary_accesses += 1;
                pcb.stats.memory_cycles += pcb.weights.primary;
            }
            Tier::Secondary => {
                pcb.stats.secondary_accesses += 1;
                pcb.stats.memory_cycles += pcb.weights.secondary;
            }
        }
        pcb.stats.mem_accesses_total += 1;
    }

    /// Reads a missing word from its tier and installs it, committing any dirty victim.
    fn fill(&mut self, addr: u32, tier: Tier, offset: u32, pcb: &mut Pcb) -> u32 {
        Self::charge_tier(tier, pcb);
        let word = match tier {
            Tier::Primary => self.primary.read(offset),
            Tier::Secondary => self.secondary.read(offset),
        };
        if let Some(victim) = self.cache.install(addr, word, false) {
            if let Some((victim_tier, _)) = self.resolve(victim.addr) {
                Self::charge_tier(victim_tier, pcb);
            }
            self.store(victim);
        }
        word
    }

    /// Writes a word to the tier owning its address.
    fn store(&mut self, wb: WriteBack) {
        let written = match self.resolve(wb.addr) {
            Some((Tier::Primary, offset)) => self.primary.write(offset, wb.data),
            Some((Tier::Secondary, offset)) => self.secondary.write(offset, wb.data),
            None => false,
        };
        if !written {
            warn!(addr = wb.addr, "write-back outside memory dropped");
        }
    }
}
