//! Instruction Decoder.
//!
//! Classifies a raw 32-bit word by its 6-bit opcode (and, for opcode `0`, its 6-bit funct
//! field) into a [`Mnemonic`], and extracts every operand field at its fixed bit position.
//! Unrecognized encodings decode to `mnemonic: None`; the pipeline treats such records as
//! no-ops.

use crate::core::arch::reg::Reg;
use crate::isa::instruction::{Decoded, InstructionBits, Mnemonic};
use crate::isa::opcodes::{
    FUNCT_ADD, FUNCT_AND, FUNCT_DIV, FUNCT_MULT, FUNCT_SUB, OP_ADDI, OP_BEQ, OP_BGT, OP_BGTI,
    OP_BLT, OP_BLTI, OP_BNE, OP_END, OP_J, OP_LA, OP_LI, OP_LW, OP_PRINT, OP_RTYPE, OP_SW,
};

/// Selects the mnemonic for a raw instruction word.
///
/// `PRINT` with a non-zero immediate is the memory form; with a zero immediate it prints
/// the register in `rt`.
///
/// # Returns
///
/// `Some(mnemonic)` for a recognized encoding, `None` otherwise.
pub fn mnemonic_of(inst: u32) -> Option<Mnemonic> {
    let m = match inst.opcode() {
        OP_RTYPE => match inst.funct() {
            FUNCT_ADD => Mnemonic::Add,
            FUNCT_SUB => Mnemonic::Sub,
            FUNCT_MULT => Mnemonic::Mult,
            FUNCT_DIV => Mnemonic::Div,
            FUNCT_AND => Mnemonic::And,
            _ => return None,
        },
        OP_J => Mnemonic::J,
        OP_BEQ => Mnemonic::Beq,
        OP_BNE => Mnemonic::Bne,
        OP_BGT => Mnemonic::Bgt,
        OP_ADDI => Mnemonic::Addi,
        OP_BLT => Mnemonic::Blt,
        OP_BLTI => Mnemonic::Blti,
        OP_BGTI => Mnemonic::Bgti,
        OP_LA => Mnemonic::La,
        OP_LI => Mnemonic::Li,
        OP_LW => Mnemonic::Lw,
        OP_SW => Mnemonic::Sw,
        OP_PRINT if inst.imm16() != 0 => Mnemonic::PrintMem,
        OP_PRINT => Mnemonic::Print,
        OP_END => Mnemonic::End,
        _ => return None,
    };
    Some(m)
}

/// Decodes a raw 32-bit instruction.
///
/// # Arguments
///
/// * `inst` - The raw instruction word.
///
/// # Returns
///
/// A [`Decoded`] with every field populated. `mnemonic` is `None` for unknown encodings.
pub fn decode(inst: u32) -> Decoded {
    Decoded {
        raw: inst,
        mnemonic: mnemonic_of(inst),
        rs: Reg::from_field(inst.rs()),
        rt: Reg::from_field(inst.rt()),
        rd: Reg::from_field(inst.rd()),
        rt_field: inst.rt(),
        imm: inst.imm16(),
        target: inst.target26(),
    }
}
