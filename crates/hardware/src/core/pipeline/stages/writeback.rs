//! Writeback (WB) Stage.

use crate::core::pipeline::engine::Core;
use crate::isa::instruction::Mnemonic;

/// Executes the writeback stage of the pipeline.
///
/// Commits `SW` to the memory hierarchy and retires the record. Register results were
/// already written by EX or MEM.
///
/// # Arguments
///
/// * `core` - Pipeline state for the running quantum.
/// * `idx` - Index of the record admitted four cycles ago.
pub fn wb_stage(core: &mut Core<'_>, idx: usize) {
    let record = core.records[idx];
    if record.mnemonic() == Some(Mnemonic::Sw) {
        if let Some(addr) = record.address {
            core.memory.write(addr, record.store_value, core.pcb);
        }
    }
    core.note(idx, "WB");
    core.retire();
}
