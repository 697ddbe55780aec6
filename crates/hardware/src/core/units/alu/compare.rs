//! ALU comparison operations.
//!
//! Used by the branch instructions. The result is `1` when the condition holds and `0`
//! otherwise; comparisons never overflow.

use super::AluOutput;
use crate::core::pipeline::signals::AluOp;

/// Executes a signed comparison.
///
/// Returns `0` for non-comparison operations.
pub fn execute(op: AluOp, a: i32, b: i32) -> AluOutput {
    let taken = match op {
        AluOp::Eq => a == b,
        AluOp::Ne => a != b,
        AluOp::Lt => a < b,
        AluOp::Gt => a > b,
        _ => false,
    };
    AluOutput::ok(i32::from(taken))
}
