//! Opcode and function-code constants.
//!
//! Every instruction carries a 6-bit opcode in bits 26-31. Register-register
//! arithmetic shares opcode `0` and is distinguished by the 6-bit funct field in
//! bits 0-5.

/// R-type arithmetic (selected by funct).
pub const OP_RTYPE: u32 = 0x00;
/// Unconditional jump to an absolute word address.
pub const OP_J: u32 = 0x02;
/// Branch if equal.
pub const OP_BEQ: u32 = 0x04;
/// Branch if not equal.
pub const OP_BNE: u32 = 0x05;
/// Branch if greater than (signed).
pub const OP_BGT: u32 = 0x07;
/// Add immediate.
pub const OP_ADDI: u32 = 0x08;
/// Branch if less than (signed).
pub const OP_BLT: u32 = 0x09;
/// Branch if less than a 5-bit literal held in the `rt` field.
pub const OP_BLTI: u32 = 0x0A;
/// Branch if greater than a 5-bit literal held in the `rt` field.
pub const OP_BGTI: u32 = 0x0B;
/// Load address (`rt = rs + imm`, computed in the memory stage).
pub const OP_LA: u32 = 0x0E;
/// Load immediate.
pub const OP_LI: u32 = 0x0F;
/// Load word.
pub const OP_LW: u32 = 0x23;
/// Store word.
pub const OP_SW: u32 = 0x2B;
/// Print a register, or a memory word when the immediate is non-zero.
pub const OP_PRINT: u32 = 0x3E;
/// End of program.
pub const OP_END: u32 = 0x3F;

/// Funct: signed add.
pub const FUNCT_ADD: u32 = 0x20;
/// Funct: signed subtract.
pub const FUNCT_SUB: u32 = 0x22;
/// Funct: signed multiply.
pub const FUNCT_MULT: u32 = 0x18;
/// Funct: signed divide.
pub const FUNCT_DIV: u32 = 0x1A;
/// Funct: bitwise and.
pub const FUNCT_AND: u32 = 0x24;
