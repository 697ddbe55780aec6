//! Machine resources shared by every process.
//!
//! This module groups the resources the pipeline and scheduler drive. It provides:
//! 1. **Memory:** The cache-mediated two-tier memory hierarchy.
//! 2. **I/O:** Device arrival, the request queue and the I/O manager threads.

/// Concurrent I/O subsystem.
pub mod io;

/// Memory hierarchy (cache, primary and secondary store).
pub mod memory;

pub use io::IoSubsystem;
pub use memory::MemoryHierarchy;
