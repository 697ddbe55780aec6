//! Backing Store.
//!
//! A flat, fixed-size, word-addressed store. It models memory sized in advance rather than
//! demand paging: reads outside the configured size return `0` and writes outside it are
//! dropped.

/// Word-addressed backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackingStore {
    words: Vec<u32>,
}

impl BackingStore {
    /// Creates a zero-filled store of `size` words.
    pub fn new(size: u32) -> Self {
        Self {
            words: vec![0; size as usize],
        }
    }

    /// Returns the size of the store in words.
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the store holds no words.
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Reads the word at `offset`, or `0` when out of range.
    #[inline]
    pub fn read(&self, offset: u32) -> u32 {
        self.words.get(offset as usize).copied().unwrap_or(0)
    }

    /// Writes the word at `offset`.
    ///
    /// # Returns
    ///
    /// `false` if `offset` is out of range and the write was dropped.
    #[inline]
    pub fn write(&mut self, offset: u32, val: u32) -> bool {
        match self.words.get_mut(offset as usize) {
            Some(slot) => {
                *slot = val;
                true
            }
            None => false,
        }
    }
}
