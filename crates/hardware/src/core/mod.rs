//! Processor core.
//!
//! This module contains the pieces that execute a process:
//! 1. **Arch:** Register identifiers.
//! 2. **Pipeline:** The five-stage engine, its records and its control signals.
//! 3. **Units:** The arithmetic unit and the cache.

/// Architectural register identifiers.
pub mod arch;

/// Instruction pipeline implementation (engine, records, signals, stages).
pub mod pipeline;

/// Execution units (ALU, cache).
pub mod units;

pub use self::pipeline::{Core, QuantumOutcome, run_quantum};
