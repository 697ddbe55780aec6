//! Fully Associative Write-Back Cache.
//!
//! This module implements the small cache that fronts the backing stores. It provides:
//! 1. **Lookup:** Address-keyed search over every line.
//! 2. **Installation:** FIFO victim selection through a [`ReplacementPolicy`].
//! 3. **Write-Back:** Dirty victims are handed back to the caller as [`WriteBack`] records at
//!    the moment they leave the cache, so the caller can commit them atomically.
//!
//! The cache never touches a backing store itself; the memory hierarchy owns that.

/// Cache replacement policy implementations.
pub mod policies;

use self::policies::{FifoPolicy, ReplacementPolicy};

/// Cache line entry: address key, data word, validity and dirty bits.
#[derive(Clone, Copy, Default, Debug)]
struct CacheLine {
    addr: u32,
    data: u32,
    valid: bool,
    dirty: bool,
}

/// A dirty line that must be committed to its backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteBack {
    /// Address of the evicted line.
    pub addr: u32,
    /// Authoritative data word.
    pub data: u32,
}

/// Fully associative cache with one word per line.
#[derive(Debug)]
pub struct Cache {
    lines: Vec<CacheLine>,
    policy: Box<dyn ReplacementPolicy>,
}

impl Cache {
    /// Creates a FIFO cache.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of lines. A capacity of `0` is raised to `1`.
    pub fn new(capacity: usize) -> Self {
        let ways = capacity.max(1);
        Self::with_policy(ways, Box::new(FifoPolicy::new(ways)))
    }

    /// Creates a cache with a caller-supplied replacement policy.
    pub fn with_policy(capacity: usize, policy: Box<dyn ReplacementPolicy>) -> Self {
        Self {
            lines: vec![CacheLine::default(); capacity.max(1)],
            policy,
        }
    }

    /// Number of lines the cache holds.
    pub const fn capacity(&self) -> usize {
        self.lines.len()
    }

    /// Number of valid lines.
    pub fn len(&self) -> usize {
        self.lines.iter().filter(|l| l.valid).count()
    }

    /// Returns `true` if no line is valid.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find(&self, addr: u32) -> Option<usize> {
        self.lines.iter().position(|l| l.valid && l.addr == addr)
    }

    /// Returns the cached word for `addr`, if present.
    pub fn lookup(&self, addr: u32) -> Option<u32> {
        self.find(addr).map(|idx| self.lines[idx].data)
    }

    /// Checks if the cache contains the specified address.
    pub fn contains(&self, addr: u32) -> bool {
        self.find(addr).is_some()
    }

    /// Returns `true` if `addr` is cached and newer than its backing copy.
    pub fn is_dirty(&self, addr: u32) -> bool {
        self.find(addr).is_some_and(|idx| self.lines[idx].dirty)
    }

    /// Updates a cached word in place and marks it dirty.
    ///
    /// # Returns
    ///
    /// `false` if `addr` is not cached (nothing is written).
    pub fn write_hit(&mut self, addr: u32, data: u32) -> bool {
        match self.find(addr) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.data = data;
                line.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Installs a line, evicting the FIFO victim if the cache is full.
    ///
    /// If `addr` is already cached its line is overwritten in place and nothing is evicted.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address key.
    /// * `data` - Word to cache.
    /// * `dirty` - Whether the word is already newer than its backing copy.
    ///
    /// # Returns
    ///
    /// The evicted line's data if the victim was dirty, which the caller must commit.
    pub fn install(&mut self, addr: u32, data: u32, dirty: bool) -> Option<WriteBack> {
        if let Some(idx) = self.find(addr) {
            let line = &mut self.lines[idx];
            line.data = data;
            line.dirty |= dirty;
            return None;
        }

        let way = self.policy.victim() % self.lines.len();
        let victim = self.lines[way];
        self.lines[way] = CacheLine {
            addr,
            data,
            valid: true,
            dirty,
        };
        self.policy.installed(way);

        (victim.valid && victim.dirty).then_some(WriteBack {
            addr: victim.addr,
            data: victim.data,
        })
    }

    /// Removes `addr` from the cache.
    ///
    /// # Returns
    ///
    /// The line's data if it was dirty.
    pub fn invalidate(&mut self, addr: u32) -> Option<WriteBack> {
        let idx = self.find(addr)?;
        let line = std::mem::take(&mut self.lines[idx]);
        line.dirty.then_some(WriteBack {
            addr: line.addr,
            data: line.data,
        })
    }

    /// Marks every dirty line clean.
    ///
    /// # Returns
    ///
    /// The dirty lines, in way order, for the caller to commit.
    pub fn flush(&mut self) -> Vec<WriteBack> {
        self.lines
            .iter_mut()
            .filter(|l| l.valid && l.dirty)
            .map(|l| {
                l.dirty = false;
                WriteBack {
                    addr: l.addr,
                    data: l.data,
                }
            })
            .collect()
    }
}
