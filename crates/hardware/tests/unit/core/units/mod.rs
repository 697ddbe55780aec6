/// Arithmetic unit.
pub mod alu;

/// FIFO write-back cache.
pub mod cache;
