//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks shared by every component. It includes:
//! 1. **Constants:** The end sentinel, pipeline depth, and instruction field layout.
//! 2. **Error Handling:** Structural and admission error types.
//! 3. **Register Management:** The per-process register file.
//! 4. **Synchronization:** Poison-tolerant lock acquisition.

/// Machine-wide constants.
pub mod constants;

/// Error types for structural misuse and process admission.
pub mod error;

/// Register file implementation.
pub mod reg;

/// Poison-tolerant locking.
pub mod sync;

pub use constants::{END_SENTINEL, PIPELINE_DEPTH};
pub use error::{LoadError, SimError};
pub use reg::RegisterFile;
