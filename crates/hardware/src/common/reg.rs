//! Per-Process Register File.
//!
//! This module provides the `RegisterFile` struct, the architectural register state owned by
//! every process. It provides:
//! 1. **Flat Storage:** One 32-bit word per [`Reg`] identifier, general and special alike.
//! 2. **Invariant Enforcement:** Writes to `zero` are discarded in the setter.
//! 3. **Name Access:** Lookup through the static ABI table for loaders and tests.
//! 4. **Observability:** A textual dump of the full register state.

use std::fmt::Write as _;

use crate::common::error::SimError;
use crate::core::arch::reg::{REG_COUNT, Reg};

/// Architectural register state of one process.
///
/// Indexed by [`Reg`]; register `zero` always reads 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; REG_COUNT],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub const fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register to read.
    ///
    /// # Returns
    ///
    /// The 32-bit value held by `reg`. `Reg::Zero` always returns 0.
    #[inline]
    pub const fn read(&self, reg: Reg) -> u32 {
        self.regs[reg.index()]
    }

    /// Writes a register. Writes to `Reg::Zero` are ignored.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register to write.
    /// * `val` - The 32-bit value to store.
    #[inline]
    pub const fn write(&mut self, reg: Reg, val: u32) {
        if !matches!(reg, Reg::Zero) {
            self.regs[reg.index()] = val;
        }
    }

    /// Reads a register and reinterprets it as a signed word.
    #[inline]
    pub const fn read_signed(&self, reg: Reg) -> i32 {
        self.read(reg) as i32
    }

    /// Reads a register by ABI name (`"t1"`, `"$t1"`, `"pc"`, `"hi"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] when `name` is not in the register table.
    pub fn read_named(&self, name: &str) -> Result<u32, SimError> {
        Ok(self.read(Reg::from_name(name)?))
    }

    /// Writes a register by ABI name.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] when `name` is not in the register table.
    pub fn write_named(&mut self, name: &str, val: u32) -> Result<(), SimError> {
        self.write(Reg::from_name(name)?, val);
        Ok(())
    }

    /// Clears every register back to zero.
    pub const fn reset(&mut self) {
        self.regs = [0; REG_COUNT];
    }

    /// Renders every register as `name=value` pairs, four per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for row in Reg::ALL.chunks(4) {
            for (col, reg) in row.iter().enumerate() {
                if col > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{:>4}={:#010x}", reg.name(), self.read(*reg));
            }
            out.push('\n');
        }
        out
    }
}
