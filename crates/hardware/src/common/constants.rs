//! Global Machine Constants.
//!
//! This module defines machine-wide constants used across the simulator. It includes:
//! 1. **Program Constants:** The end-of-program sentinel word.
//! 2. **Pipeline Constants:** Depth of the overlapped pipeline.
//! 3. **Field Constants:** Bit positions and masks of the 32-bit instruction word.

/// Reserved word marking the end of a program image.
///
/// Only the high six bits are set, which is the `END` opcode with every
/// operand field zero.
pub const END_SENTINEL: u32 = 0xFC00_0000;

/// Number of stages in the pipeline (IF, ID, EX, MEM, WB).
///
/// Also the initial value of the engine's drain budget.
pub const PIPELINE_DEPTH: u32 = 5;

/// Number of addressable words one instruction occupies.
pub const INSTRUCTION_SLOT: u32 = 1;

/// Bit position of the 6-bit opcode field.
pub const OPCODE_SHIFT: u32 = 26;

/// Mask for the 6-bit opcode and funct fields.
pub const SIX_BIT_MASK: u32 = 0x3F;

/// Bit position of the `rs` register field.
pub const RS_SHIFT: u32 = 21;

/// Bit position of the `rt` register field.
pub const RT_SHIFT: u32 = 16;

/// Bit position of the `rd` register field.
pub const RD_SHIFT: u32 = 11;

/// Mask for 5-bit register fields.
pub const REG_FIELD_MASK: u32 = 0x1F;

/// Mask for the 16-bit immediate field.
pub const IMM16_MASK: u32 = 0xFFFF;

/// Mask for the 26-bit jump target field.
pub const TARGET26_MASK: u32 = 0x03FF_FFFF;
