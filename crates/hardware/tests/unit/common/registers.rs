//! Register File Tests.
//!
//! Verifies name-based access, the zero register invariant, reset and dump rendering.

use mipsim_core::common::{RegisterFile, SimError};
use mipsim_core::core::arch::Reg;
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn new_file_reads_zero_everywhere() {
    let regs = RegisterFile::new();
    assert!(Reg::ALL.iter().all(|r| regs.read(*r) == 0));
}

#[rstest]
#[case("t1", Reg::T1)]
#[case("$t1", Reg::T1)]
#[case("$T1", Reg::T1)]
#[case("$9", Reg::T1)]
#[case("s8", Reg::Fp)]
#[case("ra", Reg::Ra)]
#[case("hi", Reg::Hi)]
#[case("pc", Reg::Pc)]
fn names_resolve(#[case] name: &str, #[case] reg: Reg) {
    assert_eq!(Reg::from_name(name), Ok(reg));
}

#[test]
fn write_named_then_read_named() {
    let mut regs = RegisterFile::new();
    regs.write_named("$s0", 0xDEAD_BEEF).unwrap();
    assert_eq!(regs.read_named("s0").unwrap(), 0xDEAD_BEEF);
    assert_eq!(regs.read(Reg::S0), 0xDEAD_BEEF);
}

#[rstest]
#[case("t10")]
#[case("$32")]
#[case("")]
#[case("x1")]
fn unknown_names_are_hard_errors(#[case] name: &str) {
    let mut regs = RegisterFile::new();
    assert_eq!(
        regs.read_named(name),
        Err(SimError::InvalidRegister(name.to_owned()))
    );
    assert_eq!(
        regs.write_named(name, 1),
        Err(SimError::InvalidRegister(name.to_owned()))
    );
}

#[test]
fn reset_clears_every_register() {
    let mut regs = RegisterFile::new();
    for (i, reg) in Reg::ALL.iter().enumerate() {
        regs.write(*reg, i as u32 + 1);
    }
    regs.reset();
    assert!(Reg::ALL.iter().all(|r| regs.read(*r) == 0));
}

#[test]
fn dump_lists_every_register() {
    let mut regs = RegisterFile::new();
    regs.write(Reg::T3, 12);
    let dump = regs.dump();
    assert!(dump.contains("t3=0x0000000c"));
    assert_eq!(dump.lines().count(), Reg::ALL.len().div_ceil(4));
}

proptest! {
    #[test]
    fn zero_register_ignores_writes(value in any::<u32>()) {
        let mut regs = RegisterFile::new();
        regs.write(Reg::Zero, value);
        prop_assert_eq!(regs.read(Reg::Zero), 0);
        regs.write_named("$zero", value).unwrap();
        prop_assert_eq!(regs.read_named("zero").unwrap(), 0);
    }

    #[test]
    fn other_registers_hold_writes(idx in 1usize..40, value in any::<u32>()) {
        let reg = Reg::ALL[idx];
        let mut regs = RegisterFile::new();
        regs.write(reg, value);
        prop_assert_eq!(regs.read(reg), value);
        prop_assert_eq!(regs.read_signed(reg), value as i32);
    }
}
