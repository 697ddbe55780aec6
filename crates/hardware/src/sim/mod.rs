//! Process management and simulation driver.
//!
//! Provides the process control block, the program loader, the audit log, the round-robin
//! scheduler, and the [`Simulator`] that wires them to the memory hierarchy and the I/O
//! subsystem.

/// Append-only audit log shared by the pipeline and the I/O manager.
pub mod audit;

/// Descriptor parsing, program assembly and image placement.
pub mod loader;

/// Process control block and lifecycle state.
pub mod process;

/// Round-robin scheduler.
pub mod scheduler;

/// Top-level simulator.
pub mod simulator;

pub use audit::AuditLog;
pub use process::{Pcb, Pid, ProcessState};
pub use scheduler::{Scheduler, Step};
pub use simulator::Simulator;
