//! Instruction Decode (ID) Stage.

use crate::core::pipeline::engine::Core;
use crate::isa::decode;

/// Executes the instruction decode stage of the pipeline.
///
/// Fills in the record's decoded fields. Unknown encodings keep `mnemonic: None` and are
/// ignored by every later stage.
///
/// # Arguments
///
/// * `core` - Pipeline state for the running quantum.
/// * `idx` - Index of the record admitted one cycle ago.
pub fn decode_stage(core: &mut Core<'_>, idx: usize) {
    let record = &mut core.records[idx];
    record.decoded = Some(decode(record.raw));
    core.note(idx, "ID");
}
