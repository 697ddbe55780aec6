//! Instruction pipeline implementation.
//!
//! This module contains the overlapped five-stage pipeline. It includes the following
//! components:
//! 1. **Engine:** The per-quantum cycle loop, drain budget and branch flush.
//! 2. **Records:** One entry per admitted instruction, filled in stage by stage.
//! 3. **Signals:** Mnemonic to ALU operation mapping.
//! 4. **Stages:** Fetch, Decode, Execute, Memory, and Writeback.

/// Quantum driver: cycle loop, drain and flush.
pub mod engine;

/// In-flight instruction records.
pub mod record;

/// Control signals generated during instruction decoding.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

pub use engine::{Core, EngineConfig, QuantumOutcome, QuantumTrace, run_quantum};
pub use record::InstructionRecord;
