//! ALU arithmetic operations.
//!
//! Signed 32-bit addition, subtraction, multiplication and division. Overflow is detected
//! by evaluating in 64 bits and checking the result against the 32-bit range.

use super::AluOutput;
use crate::core::pipeline::signals::AluOp;

/// Narrows a 64-bit intermediate to 32 bits, flagging values that do not fit.
fn narrow(wide: i64) -> AluOutput {
    i32::try_from(wide).map_or_else(|_| AluOutput::fault(wide as i32), AluOutput::ok)
}

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand (base for `Address`).
/// * `b`  - Second operand (offset for `Address`).
///
/// # Returns
///
/// The result with its overflow flag. Returns `0` for non-arithmetic operations.
pub fn execute(op: AluOp, a: i32, b: i32) -> AluOutput {
    match op {
        AluOp::Add | AluOp::Address => narrow(i64::from(a) + i64::from(b)),
        AluOp::Sub => narrow(i64::from(a) - i64::from(b)),
        AluOp::Mul => narrow(i64::from(a) * i64::from(b)),
        AluOp::Div => divide(a, b).0,
        _ => AluOutput::default(),
    }
}

/// Full 64-bit signed product, used to fill `hi`/`lo`.
pub const fn wide_mul(a: i32, b: i32) -> i64 {
    a as i64 * b as i64
}

/// Signed division with fault handling.
///
/// # Returns
///
/// `(quotient, remainder)`. On division by zero the quotient is `0` with overflow set and
/// the remainder is `None`. `i32::MIN / -1` yields `i32::MIN` with overflow set and a
/// remainder of `0`.
pub fn divide(a: i32, b: i32) -> (AluOutput, Option<i32>) {
    if b == 0 {
        return (AluOutput::fault(0), None);
    }
    match a.checked_div(b) {
        Some(q) => (AluOutput::ok(q), Some(a % b)),
        None => (AluOutput::fault(i32::MIN), Some(0)),
    }
}
