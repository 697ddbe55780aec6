/// Cache-mediated memory hierarchy.
pub mod memory;

/// Device threads and the I/O manager.
pub mod io;
