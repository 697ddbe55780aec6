/// Five-stage pipeline engine.
pub mod pipeline;

/// Arithmetic unit and cache.
pub mod units;
