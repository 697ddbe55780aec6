//! Register Identifiers.
//!
//! This module defines the fixed set of architectural registers. It provides:
//! 1. **Identifiers:** `Reg`, one variant per general-purpose and special register.
//! 2. **Indexing:** A dense index used by the flat register file.
//! 3. **Naming:** A static, read-only name table shared by the loader, disassembler and dumps.

use crate::common::error::SimError;
use crate::isa::abi;

/// Number of general-purpose registers.
pub const GPR_COUNT: usize = 32;

/// Total number of architectural registers (general plus special).
pub const REG_COUNT: usize = GPR_COUNT + 8;

/// Architectural register identifier.
///
/// The first 32 variants are the MIPS general-purpose registers in encoding order; the rest
/// are special registers that instructions never name directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Reg {
    /// `$0`, hardwired to zero.
    Zero,
    /// `$1`, assembler temporary.
    At,
    /// `$2`, value register 0.
    V0,
    /// `$3`, value register 1.
    V1,
    /// `$4`, argument 0.
    A0,
    /// `$5`, argument 1.
    A1,
    /// `$6`, argument 2.
    A2,
    /// `$7`, argument 3.
    A3,
    /// `$8`, temporary 0.
    T0,
    /// `$9`, temporary 1.
    T1,
    /// `$10`, temporary 2.
    T2,
    /// `$11`, temporary 3.
    T3,
    /// `$12`, temporary 4.
    T4,
    /// `$13`, temporary 5.
    T5,
    /// `$14`, temporary 6.
    T6,
    /// `$15`, temporary 7.
    T7,
    /// `$16`, saved 0.
    S0,
    /// `$17`, saved 1.
    S1,
    /// `$18`, saved 2.
    S2,
    /// `$19`, saved 3.
    S3,
    /// `$20`, saved 4.
    S4,
    /// `$21`, saved 5.
    S5,
    /// `$22`, saved 6.
    S6,
    /// `$23`, saved 7.
    S7,
    /// `$24`, temporary 8.
    T8,
    /// `$25`, temporary 9.
    T9,
    /// `$26`, kernel 0.
    K0,
    /// `$27`, kernel 1.
    K1,
    /// `$28`, global pointer.
    Gp,
    /// `$29`, stack pointer.
    Sp,
    /// `$30`, frame pointer.
    Fp,
    /// `$31`, return address.
    Ra,
    /// Program counter (word address of the next fetch).
    Pc,
    /// Memory address register (last address presented by fetch).
    Mar,
    /// Condition register.
    Cr,
    /// Exception program counter.
    Epc,
    /// Status register.
    Sr,
    /// High word of a product, or remainder of a division.
    Hi,
    /// Low word of a product, or quotient of a division.
    Lo,
    /// Instruction register (last word fetched).
    Ir,
}

impl Reg {
    /// Every register in index order.
    pub const ALL: [Self; REG_COUNT] = [
        Self::Zero,
        Self::At,
        Self::V0,
        Self::V1,
        Self::A0,
        Self::A1,
        Self::A2,
        Self::A3,
        Self::T0,
        Self::T1,
        Self::T2,
        Self::T3,
        Self::T4,
        Self::T5,
        Self::T6,
        Self::T7,
        Self::S0,
        Self::S1,
        Self::S2,
        Self::S3,
        Self::S4,
        Self::S5,
        Self::S6,
        Self::S7,
        Self::T8,
        Self::T9,
        Self::K0,
        Self::K1,
        Self::Gp,
        Self::Sp,
        Self::Fp,
        Self::Ra,
        Self::Pc,
        Self::Mar,
        Self::Cr,
        Self::Epc,
        Self::Sr,
        Self::Hi,
        Self::Lo,
        Self::Ir,
    ];

    /// Dense index of this register in the flat register file.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Maps a 5-bit instruction register field to a general-purpose register.
    ///
    /// Only the low five bits of `field` are used.
    #[inline]
    pub const fn from_field(field: u32) -> Self {
        Self::ALL[(field & 0x1F) as usize]
    }

    /// Returns `true` for `zero` through `ra`.
    pub const fn is_gpr(self) -> bool {
        self.index() < GPR_COUNT
    }

    /// ABI name without the `$` prefix.
    pub const fn name(self) -> &'static str {
        abi::REG_NAMES[self.index()]
    }

    /// Resolves an ABI name. Accepts an optional `$` prefix, any letter case, and the
    /// numeric form `$0`..`$31` for general-purpose registers.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] for names outside the table.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        abi::lookup(name).ok_or_else(|| SimError::InvalidRegister(name.to_owned()))
    }
}

impl std::fmt::Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_gpr() {
            write!(f, "${}", self.name())
        } else {
            f.write_str(self.name())
        }
    }
}
