//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction word into assembly text for trace events, the audit log,
//! and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use mipsim_core::core::arch::Reg;
//! use mipsim_core::isa::{disasm::disassemble, encode};
//!
//! assert_eq!(disassemble(encode::add(Reg::T3, Reg::T1, Reg::T2)), "add $t3, $t1, $t2");
//! assert_eq!(disassemble(encode::lw(Reg::T4, Reg::Zero, 20)), "lw $t4, 20($zero)");
//! ```

use crate::isa::decode::decode;
use crate::isa::instruction::Mnemonic;

/// Disassembles one instruction word.
///
/// # Returns
///
/// Lower-case assembly text. Unknown encodings render as `.word 0x........`.
pub fn disassemble(inst: u32) -> String {
    let d = decode(inst);
    let Some(m) = d.mnemonic else {
        return format!(".word {inst:#010x}");
    };
    let op = m.as_str().to_ascii_lowercase();
    match m {
        Mnemonic::Add | Mnemonic::Sub | Mnemonic::Mult | Mnemonic::Div | Mnemonic::And => {
            format!("{op} {}, {}, {}", d.rd, d.rs, d.rt)
        }
        Mnemonic::Addi => format!("{op} {}, {}, {}", d.rt, d.rs, d.imm),
        Mnemonic::Li => format!("{op} {}, {}", d.rt, d.imm),
        Mnemonic::La | Mnemonic::Lw | Mnemonic::Sw => {
            format!("{op} {}, {}({})", d.rt, d.imm, d.rs)
        }
        Mnemonic::Beq | Mnemonic::Bne | Mnemonic::Blt | Mnemonic::Bgt => {
            format!("{op} {}, {}, {}", d.rs, d.rt, d.imm)
        }
        Mnemonic::Blti | Mnemonic::Bgti => format!("{op} {}, {}, {}", d.rs, d.rt_field, d.imm),
        Mnemonic::J => format!("{op} {}", d.target),
        Mnemonic::Print => format!("{op} {}", d.rt),
        Mnemonic::PrintMem => format!("{op} [{}]", d.imm),
        Mnemonic::End => op,
    }
}
