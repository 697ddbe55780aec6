//! Cache Replacement Policies.
//!
//! Victim selection for the fully associative cache. Only insertion order matters to the
//! policies here; lookups never update replacement state.
//!
//! # Policies
//!
//! - `Fifo`: evicts lines in the order they were installed.

/// First-In, First-Out replacement policy.
pub mod fifo;

pub use fifo::FifoPolicy;

/// Trait for cache replacement policies over a single fully associative set.
pub trait ReplacementPolicy: Send + Sync + std::fmt::Debug {
    /// Records that `line` has just received a new address.
    fn installed(&mut self, line: usize);

    /// Selects the line to overwrite on the next installation.
    ///
    /// # Returns
    ///
    /// A line index below the cache capacity.
    fn victim(&mut self) -> usize;
}
