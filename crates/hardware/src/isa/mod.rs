//! Instruction Set Architecture (ISA) Definitions.
//!
//! A small MIPS-like instruction set: register-register arithmetic under opcode `0`,
//! immediate arithmetic and memory operations, compare-and-branch, an absolute jump, and the
//! simulator-specific `PRINT` and `END` operations. Memory is word-addressed, so the
//! program counter advances by one per instruction.

/// Register name table.
pub mod abi;

/// Opcode and funct field classification into mnemonics.
pub mod decode;

/// Instruction disassembler for trace events and diagnostics.
pub mod disasm;

/// Instruction word builders.
pub mod encode;

/// Field extraction and the decoded instruction structure.
pub mod instruction;

/// Opcode and funct constants.
pub mod opcodes;

pub use decode::decode;
pub use instruction::{Decoded, Family, InstructionBits, Mnemonic};
