//! # Unit Components
//!
//! Tests grouped by the part of the simulator they exercise.


/// Configuration defaults and JSON overrides.
pub mod config;

/// Processor core: ALU, cache and the pipeline engine.
pub mod core;

/// Instruction decoding, encoding and disassembly.
pub mod isa;


/// Memory hierarchy and I/O subsystem.
pub mod soc;
