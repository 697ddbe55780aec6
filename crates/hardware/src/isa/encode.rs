//! Instruction Encoder.
//!
//! Builds raw instruction words from operands. Used by the program loader and by tests
//! that assemble small programs inline.

use crate::common::constants::{
    END_SENTINEL, IMM16_MASK, OPCODE_SHIFT, RD_SHIFT, REG_FIELD_MASK, RS_SHIFT, RT_SHIFT,
    SIX_BIT_MASK, TARGET26_MASK,
};
use crate::core::arch::reg::Reg;
use crate::isa::opcodes::{
    FUNCT_ADD, FUNCT_AND, FUNCT_DIV, FUNCT_MULT, FUNCT_SUB, OP_ADDI, OP_BEQ, OP_BGT, OP_BGTI,
    OP_BLT, OP_BLTI, OP_BNE, OP_J, OP_LA, OP_LI, OP_LW, OP_PRINT, OP_RTYPE, OP_SW,
};

/// Encodes an R-type word: `opcode=0 | rs | rt | rd | shamt=0 | funct`.
pub const fn r_type(funct: u32, rd: Reg, rs: Reg, rt: Reg) -> u32 {
    ((OP_RTYPE & SIX_BIT_MASK) << OPCODE_SHIFT)
        | ((rs.index() as u32 & REG_FIELD_MASK) << RS_SHIFT)
        | ((rt.index() as u32 & REG_FIELD_MASK) << RT_SHIFT)
        | ((rd.index() as u32 & REG_FIELD_MASK) << RD_SHIFT)
        | (funct & SIX_BIT_MASK)
}

/// Encodes an I-type word with raw field values: `opcode | rs | rt | imm16`.
pub const fn i_fields(opcode: u32, rs: u32, rt: u32, imm: i16) -> u32 {
    ((opcode & SIX_BIT_MASK) << OPCODE_SHIFT)
        | ((rs & REG_FIELD_MASK) << RS_SHIFT)
        | ((rt & REG_FIELD_MASK) << RT_SHIFT)
        | (imm as u16 as u32 & IMM16_MASK)
}

/// Encodes an I-type word from register operands.
pub const fn i_type(opcode: u32, rs: Reg, rt: Reg, imm: i16) -> u32 {
    i_fields(opcode, rs.index() as u32, rt.index() as u32, imm)
}

/// Encodes a J-type word: `opcode | target26`.
pub const fn j_type(opcode: u32, target: u32) -> u32 {
    ((opcode & SIX_BIT_MASK) << OPCODE_SHIFT) | (target & TARGET26_MASK)
}

/// `ADD rd, rs, rt`
pub const fn add(rd: Reg, rs: Reg, rt: Reg) -> u32 {
    r_type(FUNCT_ADD, rd, rs, rt)
}

/// `SUB rd, rs, rt`
pub const fn sub(rd: Reg, rs: Reg, rt: Reg) -> u32 {
    r_type(FUNCT_SUB, rd, rs, rt)
}

/// `MULT rd, rs, rt`
pub const fn mult(rd: Reg, rs: Reg, rt: Reg) -> u32 {
    r_type(FUNCT_MULT, rd, rs, rt)
}

/// `DIV rd, rs, rt`
pub const fn div(rd: Reg, rs: Reg, rt: Reg) -> u32 {
    r_type(FUNCT_DIV, rd, rs, rt)
}

/// `AND rd, rs, rt`
pub const fn and(rd: Reg, rs: Reg, rt: Reg) -> u32 {
    r_type(FUNCT_AND, rd, rs, rt)
}

/// `ADDI rt, rs, imm`
pub const fn addi(rt: Reg, rs: Reg, imm: i16) -> u32 {
    i_type(OP_ADDI, rs, rt, imm)
}

/// `LI rt, imm`
pub const fn li(rt: Reg, imm: i16) -> u32 {
    i_type(OP_LI, Reg::Zero, rt, imm)
}

/// `LA rt, imm(rs)`
pub const fn la(rt: Reg, rs: Reg, imm: i16) -> u32 {
    i_type(OP_LA, rs, rt, imm)
}

/// `LW rt, offset(base)`
pub const fn lw(rt: Reg, base: Reg, offset: i16) -> u32 {
    i_type(OP_LW, base, rt, offset)
}

/// `SW rt, offset(base)`
pub const fn sw(rt: Reg, base: Reg, offset: i16) -> u32 {
    i_type(OP_SW, base, rt, offset)
}

/// `BEQ rs, rt, offset` (offset relative to the following slot)
pub const fn beq(rs: Reg, rt: Reg, offset: i16) -> u32 {
    i_type(OP_BEQ, rs, rt, offset)
}

/// `BNE rs, rt, offset`
pub const fn bne(rs: Reg, rt: Reg, offset: i16) -> u32 {
    i_type(OP_BNE, rs, rt, offset)
}

/// `BLT rs, rt, offset`
pub const fn blt(rs: Reg, rt: Reg, offset: i16) -> u32 {
    i_type(OP_BLT, rs, rt, offset)
}

/// `BGT rs, rt, offset`
pub const fn bgt(rs: Reg, rt: Reg, offset: i16) -> u32 {
    i_type(OP_BGT, rs, rt, offset)
}

/// `BLTI rs, literal, offset`; `literal` is truncated to 5 bits.
pub const fn blti(rs: Reg, literal: u32, offset: i16) -> u32 {
    i_fields(OP_BLTI, rs.index() as u32, literal, offset)
}

/// `BGTI rs, literal, offset`; `literal` is truncated to 5 bits.
pub const fn bgti(rs: Reg, literal: u32, offset: i16) -> u32 {
    i_fields(OP_BGTI, rs.index() as u32, literal, offset)
}

/// `J target` (absolute word address)
pub const fn j(target: u32) -> u32 {
    j_type(OP_J, target)
}

/// `PRINT rt`
pub const fn print(rt: Reg) -> u32 {
    i_type(OP_PRINT, Reg::Zero, rt, 0)
}

/// `PRINT [addr]`; `addr` must be non-zero, address `0` encodes the register form.
pub const fn print_mem(addr: i16) -> u32 {
    i_type(OP_PRINT, Reg::Zero, Reg::Zero, addr)
}

/// `END`
pub const fn end() -> u32 {
    END_SENTINEL
}
