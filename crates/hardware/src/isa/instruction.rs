//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction for the 32-bit instruction word and the structures the decoder
//! produces:
//! 1. **Field Extraction:** The `InstructionBits` trait over `u32`.
//! 2. **Mnemonics:** The closed set of operations the pipeline understands.
//! 3. **Decoded Form:** Operand registers, the sign-extended immediate and the jump field.

use crate::common::constants::{
    IMM16_MASK, OPCODE_SHIFT, RD_SHIFT, REG_FIELD_MASK, RS_SHIFT, RT_SHIFT, SIX_BIT_MASK,
    TARGET26_MASK,
};
use crate::core::arch::reg::Reg;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 26-31).
    fn opcode(&self) -> u32;

    /// Extracts the first source register field (bits 21-25).
    fn rs(&self) -> u32;

    /// Extracts the target register field (bits 16-20).
    ///
    /// Destination of I-type instructions, second source of R-type and branches.
    fn rt(&self) -> u32;

    /// Extracts the destination register field of R-type instructions (bits 11-15).
    fn rd(&self) -> u32;

    /// Extracts the function code (bits 0-5).
    fn funct(&self) -> u32;

    /// Extracts the 16-bit immediate and sign-extends it to 32 bits.
    ///
    /// Values at or above `0x8000` are negative.
    fn imm16(&self) -> i32;

    /// Extracts the 26-bit jump target (bits 0-25).
    fn target26(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & SIX_BIT_MASK
    }

    #[inline(always)]
    fn rs(&self) -> u32 {
        (self >> RS_SHIFT) & REG_FIELD_MASK
    }

    #[inline(always)]
    fn rt(&self) -> u32 {
        (self >> RT_SHIFT) & REG_FIELD_MASK
    }

    #[inline(always)]
    fn rd(&self) -> u32 {
        (self >> RD_SHIFT) & REG_FIELD_MASK
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & SIX_BIT_MASK
    }

    #[inline(always)]
    fn imm16(&self) -> i32 {
        i32::from((self & IMM16_MASK) as u16 as i16)
    }

    #[inline(always)]
    fn target26(&self) -> u32 {
        self & TARGET26_MASK
    }
}

/// Operation selected by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// `rd = rs + rt`
    Add,
    /// `rd = rs - rt`
    Sub,
    /// `rd = rs * rt`, product halves in `hi`/`lo`
    Mult,
    /// `rd = rs / rt`, quotient in `lo`, remainder in `hi`
    Div,
    /// `rd = rs & rt`
    And,
    /// `rt = rs + imm`
    Addi,
    /// `rt = imm`
    Li,
    /// `rt = rs + imm` (address, no memory access)
    La,
    /// `rt = mem[rs + imm]`
    Lw,
    /// `mem[rs + imm] = rt`
    Sw,
    /// Branch to `pc + 1 + imm` if `rs == rt`.
    Beq,
    /// Branch to `pc + 1 + imm` if `rs != rt`.
    Bne,
    /// Branch to `pc + 1 + imm` if `rs < rt`.
    Blt,
    /// Branch to `pc + 1 + imm` if `rs > rt`.
    Bgt,
    /// Branch to `pc + 1 + imm` if `rs <` the literal in the `rt` field.
    Blti,
    /// Branch to `pc + 1 + imm` if `rs >` the literal in the `rt` field.
    Bgti,
    /// Jump to the absolute word address in the target field.
    J,
    /// Emit the value of `rt` as an I/O request.
    Print,
    /// Emit the word at address `imm` as an I/O request.
    PrintMem,
    /// End of program.
    End,
}

/// Broad class of a mnemonic, used by the stages to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Register results computed by the ALU in the execute stage.
    Arithmetic,
    /// Loads, stores, and address/immediate loads serviced in the memory stage.
    Memory,
    /// Conditional branches and the unconditional jump.
    Control,
    /// Print requests.
    Print,
    /// Program terminator.
    End,
}

impl Mnemonic {
    /// Returns the family this mnemonic belongs to.
    pub const fn family(self) -> Family {
        match self {
            Self::Add | Self::Sub | Self::Mult | Self::Div | Self::And | Self::Addi => {
                Family::Arithmetic
            }
            Self::Li | Self::La | Self::Lw | Self::Sw => Family::Memory,
            Self::Beq
            | Self::Bne
            | Self::Blt
            | Self::Bgt
            | Self::Blti
            | Self::Bgti
            | Self::J => Family::Control,
            Self::Print | Self::PrintMem => Family::Print,
            Self::End => Family::End,
        }
    }

    /// Upper-case assembly spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mult => "MULT",
            Self::Div => "DIV",
            Self::And => "AND",
            Self::Addi => "ADDI",
            Self::Li => "LI",
            Self::La => "LA",
            Self::Lw => "LW",
            Self::Sw => "SW",
            Self::Beq => "BEQ",
            Self::Bne => "BNE",
            Self::Blt => "BLT",
            Self::Bgt => "BGT",
            Self::Blti => "BLTI",
            Self::Bgti => "BGTI",
            Self::J => "J",
            Self::Print | Self::PrintMem => "PRINT",
            Self::End => "END",
        }
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded instruction fields.
///
/// Every field is extracted regardless of format; the mnemonic says which ones matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Raw instruction word, kept for diagnostics.
    pub raw: u32,
    /// Selected operation, or `None` for an unrecognized encoding.
    pub mnemonic: Option<Mnemonic>,
    /// First source register.
    pub rs: Reg,
    /// Target register (I-type destination, R-type second source).
    pub rt: Reg,
    /// R-type destination register.
    pub rd: Reg,
    /// Raw 5-bit `rt` field, used as a literal by `BLTI`/`BGTI`.
    pub rt_field: u32,
    /// Sign-extended 16-bit immediate.
    pub imm: i32,
    /// 26-bit jump target.
    pub target: u32,
}
