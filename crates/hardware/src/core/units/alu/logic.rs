//! ALU bitwise operations.

use super::AluOutput;
use crate::core::pipeline::signals::AluOp;

/// Executes a bitwise operation. Returns `0` for non-logic operations.
pub fn execute(op: AluOp, a: i32, b: i32) -> AluOutput {
    match op {
        AluOp::And => AluOutput::ok(a & b),
        _ => AluOutput::default(),
    }
}
