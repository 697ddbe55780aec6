//! Memory Access (MEM) Stage.
//!
//! Services the memory-class instructions whose address was computed in EX:
//! 1. **Loads:** `LW` reads through the memory hierarchy into `rt`.
//! 2. **Immediate Loads:** `LI` writes the immediate and `LA` the computed address to `rt`.
//! 3. **Memory Print:** `PRINT` with an address reads the word and issues an I/O request.
//!
//! Stores are committed later, in WB.

use crate::core::pipeline::engine::Core;
use crate::isa::instruction::Mnemonic;
use crate::soc::io::request::IoRequest;

/// Executes the memory access stage of the pipeline.
///
/// # Arguments
///
/// * `core` - Pipeline state for the running quantum.
/// * `idx` - Index of the record admitted three cycles ago.
pub fn mem_stage(core: &mut Core<'_>, idx: usize) {
    core.note(idx, "MEM");
    let record = core.records[idx];
    let Some(d) = record.decoded else {
        return;
    };
    let Some(m) = d.mnemonic else {
        return;
    };

    match m {
        Mnemonic::Lw => {
            if let Some(addr) = record.address {
                let word = core.memory.read(addr, core.pcb);
                core.pcb.regs.write(d.rt, word);
            }
        }
        Mnemonic::Li => core.pcb.regs.write(d.rt, d.imm as u32),
        Mnemonic::La => {
            if let Some(addr) = record.address {
                core.pcb.regs.write(d.rt, addr);
            }
        }
        Mnemonic::PrintMem => {
            let word = core.memory.read(d.imm as u32, core.pcb);
            let request = IoRequest::print(core.pcb.pid, word as i32);
            core.issue(request);
        }
        _ => {}
    }
}
