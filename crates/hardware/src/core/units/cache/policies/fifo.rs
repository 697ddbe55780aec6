//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! A single round-robin pointer over every line of the cache. Lines are installed at the
//! pointer, which then advances, so the pointer always names the oldest installation.
//! Invalid lines left by an invalidation are reused only when the pointer reaches them.

use super::ReplacementPolicy;

/// FIFO policy state.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Line that will be overwritten next.
    next: usize,
    /// Number of lines in the cache.
    lines: usize,
}

impl FifoPolicy {
    /// Creates a FIFO pointer over `lines` lines, starting at line `0`.
    pub fn new(lines: usize) -> Self {
        Self {
            next: 0,
            lines: lines.max(1),
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn installed(&mut self, line: usize) {
        if line == self.next {
            self.next = (self.next + 1) % self.lines;
        }
    }

    fn victim(&mut self) -> usize {
        self.next
    }
}
