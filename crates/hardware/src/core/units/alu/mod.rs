//! Arithmetic Unit.
//!
//! A stateless pure function over two signed 32-bit operands. Every result carries an
//! overflow flag; faults never halt the pipeline, they only select a documented fallback
//! value.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div, Address
//! - [`compare`]:    Eq, Ne, Lt, Gt
//! - [`logic`]:      And

/// Integer arithmetic operations (add, subtract, multiply, divide, address).
pub mod arithmetic;

/// Comparison operations producing `1` or `0`.
pub mod compare;

/// Bitwise logical operations.
pub mod logic;

use crate::core::pipeline::signals::AluOp;

/// Result of one ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AluOutput {
    /// Computed (or fallback) value.
    pub value: i32,
    /// Set on signed overflow or division by zero.
    pub overflow: bool,
}

impl AluOutput {
    /// A result with the overflow flag clear.
    pub const fn ok(value: i32) -> Self {
        Self {
            value,
            overflow: false,
        }
    }

    /// A result with the overflow flag set.
    pub const fn fault(value: i32) -> Self {
        Self {
            value,
            overflow: true,
        }
    }
}

/// Arithmetic unit for integer, compare and address operations.
#[derive(Debug, Clone, Copy)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a`  - First operand.
    /// * `b`  - Second operand.
    ///
    /// # Returns
    ///
    /// The [`AluOutput`]. Overflowing arithmetic wraps; division by zero yields `0`;
    /// `i32::MIN / -1` yields `i32::MIN`. All three set the overflow flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use mipsim_core::core::units::alu::Alu;
    /// use mipsim_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 5, 7).value, 12);
    /// assert!(Alu::execute(AluOp::Add, i32::MAX, 1).overflow);
    /// assert_eq!(Alu::execute(AluOp::Lt, -5, 10).value, 1);
    /// assert_eq!(Alu::execute(AluOp::Div, 9, 0).value, 0);
    /// ```
    pub fn execute(op: AluOp, a: i32, b: i32) -> AluOutput {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Div | AluOp::Address => {
                arithmetic::execute(op, a, b)
            }
            AluOp::Eq | AluOp::Ne | AluOp::Lt | AluOp::Gt => compare::execute(op, a, b),
            AluOp::And => logic::execute(op, a, b),
        }
    }
}
