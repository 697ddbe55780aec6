//! In-flight instruction records.

use crate::isa::instruction::{Decoded, Mnemonic};

/// One instruction admitted into the pipeline during the current quantum.
///
/// Records are appended by fetch and filled in by later stages; the engine indexes them by
/// the cycle they were admitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstructionRecord {
    /// Address the word was fetched from.
    pub pc: u32,
    /// Raw instruction word.
    pub raw: u32,
    /// Decoder output, once the record has passed ID.
    pub decoded: Option<Decoded>,
    /// Effective address computed in EX for memory-class instructions.
    pub address: Option<u32>,
    /// Value captured from `rt` in EX for a store.
    pub store_value: u32,
}

impl InstructionRecord {
    /// A freshly fetched record.
    pub const fn fetched(pc: u32, raw: u32) -> Self {
        Self {
            pc,
            raw,
            decoded: None,
            address: None,
            store_value: 0,
        }
    }

    /// The decoded mnemonic, or `None` before decode and for unknown encodings.
    pub fn mnemonic(&self) -> Option<Mnemonic> {
        self.decoded.and_then(|d| d.mnemonic)
    }
}
