//! Pipelined MIPS-like teaching simulator library.
//!
//! This crate simulates a single-core machine running several processes with the following:
//! 1. **Core:** An overlapped five-stage pipeline (fetch, decode, execute, memory, writeback)
//!    driving a per-process register file, with branch flush and quantum drain.
//! 2. **Memory:** A fully associative write-back FIFO cache in front of primary and
//!    secondary backing stores, with per-process cost accounting.
//! 3. **ISA:** Decoding, encoding and disassembly of a small MIPS-like instruction set.
//! 4. **I/O:** Background device-arrival and I/O manager threads that service blocking
//!    print requests with simulated latency.
//! 5. **Simulation:** Program loading, round-robin scheduling, audit logging, configuration,
//!    and statistics reporting.

/// Common types and constants (sentinel, field layout, errors, register file).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Processor core (registers, pipeline, ALU, cache).
pub mod core;
/// Instruction set (opcodes, decode, encode, disassembly, ABI names).
pub mod isa;
/// Processes, loader, audit log, scheduler and top-level simulator.
pub mod sim;
/// Machine resources (memory hierarchy, I/O subsystem).
pub mod soc;
/// Per-process statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Process control block and identifier.
pub use crate::sim::process::{Pcb, Pid, ProcessState};
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::simulator::Simulator;
