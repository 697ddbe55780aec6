//! Execution units and functional components.
//!
//! This module contains the stateless arithmetic unit and the cache that fronts the
//! backing stores.

/// Arithmetic unit for integer, compare and address operations.
pub mod alu;

/// Fully associative write-back cache with FIFO replacement.
pub mod cache;
