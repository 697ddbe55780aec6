//! Instruction Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It performs:
//! 1. **Arithmetic:** Routes register operands through the ALU and writes the destination.
//!    `MULT` and `DIV` also fill `hi` and `lo`.
//! 2. **Address Generation:** Computes `rs + imm` for `LW`, `SW` and `LA`, and captures the
//!    store value of `SW`.
//! 3. **Control Flow:** Evaluates branch conditions and flushes the pipeline on a taken
//!    branch or jump.
//! 4. **Register Print:** Builds the I/O request for `PRINT` from the value of `rt`.

use crate::core::arch::reg::Reg;
use crate::core::pipeline::engine::Core;
use crate::core::pipeline::signals::AluOp;
use crate::core::units::alu::Alu;
use crate::core::units::alu::arithmetic::{divide, wide_mul};
use crate::isa::instruction::{Decoded, Family, Mnemonic};
use crate::soc::io::request::IoRequest;

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `core` - Pipeline state for the running quantum.
/// * `idx` - Index of the record admitted two cycles ago.
pub fn execute_stage(core: &mut Core<'_>, idx: usize) {
    core.note(idx, "EX");
    let record = core.records[idx];
    let Some(d) = record.decoded else {
        return;
    };
    let Some(m) = d.mnemonic else {
        return;
    };

    match m.family() {
        Family::Arithmetic => arithmetic(core, m, &d),
        Family::Memory => address(core, idx, m, &d),
        Family::Control => {
            if let Some(target) = branch_target(core, record.pc, m, &d) {
                core.flush(idx, target);
            }
        }
        Family::Print => {
            if m == Mnemonic::Print {
                let value = core.pcb.regs.read_signed(d.rt);
                let request = IoRequest::print(core.pcb.pid, value);
                core.issue(request);
            }
        }
        Family::End => {}
    }
}

fn arithmetic(core: &mut Core<'_>, m: Mnemonic, d: &Decoded) {
    let regs = &mut core.pcb.regs;
    let a = regs.read_signed(d.rs);
    match m {
        Mnemonic::Addi => {
            let out = Alu::execute(AluOp::Add, a, d.imm);
            regs.write(d.rt, out.value as u32);
        }
        Mnemonic::Mult => {
            let b = regs.read_signed(d.rt);
            let product = wide_mul(a, b);
            regs.write(Reg::Hi, (product >> 32) as u32);
            regs.write(Reg::Lo, product as u32);
            regs.write(d.rd, Alu::execute(AluOp::Mul, a, b).value as u32);
        }
        Mnemonic::Div => {
            let b = regs.read_signed(d.rt);
            let (quotient, remainder) = divide(a, b);
            if let Some(rem) = remainder {
                regs.write(Reg::Lo, quotient.value as u32);
                regs.write(Reg::Hi, rem as u32);
            }
            regs.write(d.rd, quotient.value as u32);
        }
        _ => {
            if let Some(op) = AluOp::for_mnemonic(m) {
                let b = regs.read_signed(d.rt);
                regs.write(d.rd, Alu::execute(op, a, b).value as u32);
            }
        }
    }
}

fn address(core: &mut Core<'_>, idx: usize, m: Mnemonic, d: &Decoded) {
    if m == Mnemonic::Li {
        return;
    }
    let base = core.pcb.regs.read_signed(d.rs);
    let addr = Alu::execute(AluOp::Address, base, d.imm).value as u32;
    let store_value = if m == Mnemonic::Sw {
        core.pcb.regs.read(d.rt)
    } else {
        0
    };
    let record = &mut core.records[idx];
    record.address = Some(addr);
    record.store_value = store_value;
}

/// Returns the redirect target if the branch or jump is taken.
fn branch_target(core: &Core<'_>, pc: u32, m: Mnemonic, d: &Decoded) -> Option<u32> {
    if m == Mnemonic::J {
        return Some(d.target);
    }
    let regs = &core.pcb.regs;
    let a = regs.read_signed(d.rs);
    let b = match m {
        Mnemonic::Blti | Mnemonic::Bgti => d.rt_field as i32,
        _ => regs.read_signed(d.rt),
    };
    let op = AluOp::for_mnemonic(m)?;
    let taken = Alu::execute(op, a, b).value != 0;
    taken.then(|| pc.wrapping_add(1).wrapping_add_signed(d.imm))
}
