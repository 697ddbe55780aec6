//! MIPS Application Binary Interface (ABI) register names.
//!
//! Defines the standard MIPS register names and their encoding indices, followed by the
//! names of the special registers. The table is static and read-only.

use crate::core::arch::reg::{GPR_COUNT, Reg};

/// Register `$0` (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register `$2` (first value register, v0).
pub const REG_V0: usize = 2;
/// Register `$4` (first argument, a0).
pub const REG_A0: usize = 4;
/// Register `$8` (first temporary, t0).
pub const REG_T0: usize = 8;
/// Register `$16` (first saved register, s0).
pub const REG_S0: usize = 16;
/// Register `$29` (stack pointer, sp).
pub const REG_SP: usize = 29;
/// Register `$31` (return address, ra).
pub const REG_RA: usize = 31;

/// Register names in [`Reg`] index order.
pub const REG_NAMES: [&str; GPR_COUNT + 8] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "fp", "ra", "pc", "mar", "cr", "epc", "sr", "hi", "lo", "ir",
];

/// Resolves a register name to its identifier.
///
/// Accepts an optional leading `$`, ignores letter case, and accepts the numeric forms
/// `$0`..`$31` for general-purpose registers. `$s8` is accepted as an alias of `$fp`.
///
/// # Returns
///
/// `Some(reg)` if the name is known, `None` otherwise.
pub fn lookup(name: &str) -> Option<Reg> {
    let trimmed = name.trim();
    let bare = trimmed.strip_prefix('$').unwrap_or(trimmed).to_ascii_lowercase();

    if let Ok(num) = bare.parse::<usize>() {
        return (num < GPR_COUNT).then(|| Reg::ALL[num]);
    }
    if bare == "s8" {
        return Some(Reg::Fp);
    }
    REG_NAMES
        .iter()
        .position(|candidate| *candidate == bare)
        .map(|idx| Reg::ALL[idx])
}
