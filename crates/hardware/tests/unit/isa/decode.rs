//! Decoder Tests.
//!
//! Verifies opcode/funct classification, operand field positions and immediate sign
//! extension.

use mipsim_core::common::END_SENTINEL;
use mipsim_core::core::arch::Reg;
use mipsim_core::isa::encode;
use mipsim_core::isa::instruction::{Family, InstructionBits};
use mipsim_core::isa::{Mnemonic, decode};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(encode::add(Reg::T3, Reg::T1, Reg::T2), Mnemonic::Add)]
#[case(encode::sub(Reg::T3, Reg::T1, Reg::T2), Mnemonic::Sub)]
#[case(encode::mult(Reg::T3, Reg::T1, Reg::T2), Mnemonic::Mult)]
#[case(encode::div(Reg::T3, Reg::T1, Reg::T2), Mnemonic::Div)]
#[case(encode::and(Reg::T3, Reg::T1, Reg::T2), Mnemonic::And)]
#[case(encode::addi(Reg::T0, Reg::T0, 1), Mnemonic::Addi)]
#[case(encode::li(Reg::T0, 5), Mnemonic::Li)]
#[case(encode::la(Reg::T0, Reg::Zero, 5), Mnemonic::La)]
#[case(encode::lw(Reg::T0, Reg::Sp, 4), Mnemonic::Lw)]
#[case(encode::sw(Reg::T0, Reg::Sp, 4), Mnemonic::Sw)]
#[case(encode::beq(Reg::T0, Reg::T1, -2), Mnemonic::Beq)]
#[case(encode::bne(Reg::T0, Reg::T1, -2), Mnemonic::Bne)]
#[case(encode::blt(Reg::T0, Reg::T1, 3), Mnemonic::Blt)]
#[case(encode::bgt(Reg::T0, Reg::T1, 3), Mnemonic::Bgt)]
#[case(encode::blti(Reg::T0, 7, 3), Mnemonic::Blti)]
#[case(encode::bgti(Reg::T0, 7, 3), Mnemonic::Bgti)]
#[case(encode::j(12), Mnemonic::J)]
#[case(encode::print(Reg::T4), Mnemonic::Print)]
#[case(encode::print_mem(20), Mnemonic::PrintMem)]
#[case(encode::end(), Mnemonic::End)]
fn every_encoding_decodes_to_its_mnemonic(#[case] word: u32, #[case] mnemonic: Mnemonic) {
    assert_eq!(decode(word).mnemonic, Some(mnemonic));
}

#[test]
fn end_encoding_is_the_sentinel() {
    assert_eq!(encode::end(), END_SENTINEL);
    assert_eq!(decode(END_SENTINEL).mnemonic.map(Mnemonic::family), Some(Family::End));
}

#[rstest]
#[case(0x0000_0000)]
#[case(0x0000_003F)]
#[case(0x0400_0000)]
#[case(0x0C00_0000)]
fn unknown_encodings_have_no_mnemonic(#[case] word: u32) {
    assert_eq!(decode(word).mnemonic, None);
}

#[test]
fn r_type_fields_land_in_place() {
    let d = decode(encode::add(Reg::T3, Reg::T1, Reg::T2));
    assert_eq!((d.rd, d.rs, d.rt), (Reg::T3, Reg::T1, Reg::T2));
}

#[test]
fn blti_keeps_the_literal_in_rt_field() {
    let d = decode(encode::blti(Reg::S0, 17, -4));
    assert_eq!(d.rs, Reg::S0);
    assert_eq!(d.rt_field, 17);
    assert_eq!(d.imm, -4);
}

#[rstest]
#[case(0x7FFF, 32767)]
#[case(0x8000, -32768)]
#[case(0xFFFF, -1)]
#[case(0x0000, 0)]
fn immediates_sign_extend(#[case] field: u32, #[case] expected: i32) {
    let word = (0x08 << 26) | field;
    assert_eq!(word.imm16(), expected);
    assert_eq!(decode(word).imm, expected);
}

#[test]
fn jump_target_is_twenty_six_bits() {
    assert_eq!(decode(encode::j(0x03FF_FFFF)).target, 0x03FF_FFFF);
    assert_eq!(encode::j(0x0400_0001).target26(), 1);
}

proptest! {
    #[test]
    fn decode_never_panics(word in any::<u32>()) {
        let d = decode(word);
        prop_assert_eq!(d.raw, word);
        prop_assert!(d.rs.is_gpr() && d.rt.is_gpr() && d.rd.is_gpr());
    }

    #[test]
    fn i_type_immediate_survives_encoding(imm in any::<i16>()) {
        let d = decode(encode::addi(Reg::T0, Reg::T1, imm));
        prop_assert_eq!(d.imm, i32::from(imm));
        prop_assert_eq!(d.mnemonic, Some(Mnemonic::Addi));
    }
}
