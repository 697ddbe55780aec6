//! Architectural state definitions.
//!
//! This module contains the register identifiers used by the register file, decoder and
//! loader. The register file itself lives in [`crate::common::reg`].

/// Register identifiers and the ABI name mapping.
pub mod reg;

pub use reg::Reg;
