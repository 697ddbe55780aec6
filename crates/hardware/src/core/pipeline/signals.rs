//! Pipeline control signals and operation types.
//!
//! This module defines the signals that steer an instruction through the stages. It performs:
//! 1. **Operation Classification:** Maps each mnemonic to the ALU operation it needs.
//! 2. **Branch Conditions:** Selects the comparison that decides a taken branch.

use crate::isa::instruction::Mnemonic;

/// Operations the arithmetic unit can perform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Signed addition (default).
    #[default]
    Add,

    /// Signed subtraction.
    Sub,

    /// Signed multiplication (low word).
    Mul,

    /// Signed division.
    Div,

    /// Bitwise AND.
    And,

    /// `1` if operands are equal.
    Eq,

    /// `1` if operands differ.
    Ne,

    /// `1` if the first operand is less (signed).
    Lt,

    /// `1` if the first operand is greater (signed).
    Gt,

    /// Effective address `base + offset`.
    Address,
}

impl AluOp {
    /// Returns the ALU operation an instruction routes through, if any.
    ///
    /// `Li`, `J`, the print family, and `End` never use the ALU.
    pub const fn for_mnemonic(m: Mnemonic) -> Option<Self> {
        let op = match m {
            Mnemonic::Add | Mnemonic::Addi => Self::Add,
            Mnemonic::Sub => Self::Sub,
            Mnemonic::Mult => Self::Mul,
            Mnemonic::Div => Self::Div,
            Mnemonic::And => Self::And,
            Mnemonic::Beq => Self::Eq,
            Mnemonic::Bne => Self::Ne,
            Mnemonic::Blt | Mnemonic::Blti => Self::Lt,
            Mnemonic::Bgt | Mnemonic::Bgti => Self::Gt,
            Mnemonic::La | Mnemonic::Lw | Mnemonic::Sw => Self::Address,
            Mnemonic::Li | Mnemonic::J | Mnemonic::Print | Mnemonic::PrintMem | Mnemonic::End => {
                return None;
            }
        };
        Some(op)
    }
}
