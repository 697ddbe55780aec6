/// Pipeline test context and tracing setup.
pub mod harness;

/// Encoded programs shared by several tests.
pub mod programs;
