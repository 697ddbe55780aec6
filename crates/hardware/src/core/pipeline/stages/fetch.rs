//! Instruction Fetch (IF) Stage.
//!
//! Reads the word at the program counter through the memory hierarchy, latches it into
//! `mar` and `ir`, and appends a new record. The end sentinel stops the program without
//! advancing the counter, so a resumed process would fetch it again.

use crate::common::constants::{END_SENTINEL, INSTRUCTION_SLOT};
use crate::core::arch::reg::Reg;
use crate::core::pipeline::engine::Core;
use crate::core::pipeline::record::InstructionRecord;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `core` - Pipeline state for the running quantum.
pub fn fetch_stage(core: &mut Core<'_>) {
    let pc = core.pcb.pc();
    let raw = core.memory.read(pc, core.pcb);
    core.pcb.regs.write(Reg::Mar, pc);
    core.pcb.regs.write(Reg::Ir, raw);

    core.records.push(InstructionRecord::fetched(pc, raw));
    core.trace.fetched += 1;
    core.pcb.stats.instructions_fetched += 1;
    core.note(core.records.len() - 1, "IF");

    if raw == END_SENTINEL {
        core.program_ended = true;
    } else {
        core.pcb.regs.write(Reg::Pc, pc.wrapping_add(INSTRUCTION_SLOT));
    }
}
