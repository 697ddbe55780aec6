//! Arithmetic Unit Tests.
//!
//! Verifies results and overflow flags, including the documented fallbacks for division
//! by zero and `i32::MIN / -1`.

use mipsim_core::core::pipeline::signals::AluOp;
use mipsim_core::core::units::alu::Alu;
use mipsim_core::core::units::alu::arithmetic::{divide, wide_mul};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(AluOp::Add, 5, 7, 12)]
#[case(AluOp::Sub, 5, 7, -2)]
#[case(AluOp::Mul, -6, 7, -42)]
#[case(AluOp::Div, 17, 5, 3)]
#[case(AluOp::Div, -17, 5, -3)]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Address, 20, -4, 16)]
#[case(AluOp::Eq, 3, 3, 1)]
#[case(AluOp::Eq, 3, 4, 0)]
#[case(AluOp::Ne, 3, 4, 1)]
#[case(AluOp::Lt, -5, 10, 1)]
#[case(AluOp::Lt, 10, -5, 0)]
#[case(AluOp::Gt, 10, -5, 1)]
#[case(AluOp::Gt, 4, 4, 0)]
fn computes_without_overflow(#[case] op: AluOp, #[case] a: i32, #[case] b: i32, #[case] want: i32) {
    let out = Alu::execute(op, a, b);
    assert_eq!(out.value, want);
    assert!(!out.overflow);
}

#[rstest]
#[case(AluOp::Add, i32::MAX, 1, i32::MIN)]
#[case(AluOp::Sub, i32::MIN, 1, i32::MAX)]
#[case(AluOp::Mul, 0x10000, 0x10000, 0)]
fn overflow_wraps_and_flags(#[case] op: AluOp, #[case] a: i32, #[case] b: i32, #[case] want: i32) {
    let out = Alu::execute(op, a, b);
    assert_eq!(out.value, want);
    assert!(out.overflow);
}

#[test]
fn division_by_zero_yields_zero_and_no_remainder() {
    let (q, r) = divide(9, 0);
    assert_eq!(q.value, 0);
    assert!(q.overflow);
    assert_eq!(r, None);
}

#[test]
fn min_over_minus_one_saturates_to_min() {
    let (q, r) = divide(i32::MIN, -1);
    assert_eq!(q.value, i32::MIN);
    assert!(q.overflow);
    assert_eq!(r, Some(0));
}

#[test]
fn remainder_takes_the_dividend_sign() {
    assert_eq!(divide(-17, 5).1, Some(-2));
    assert_eq!(divide(17, -5).1, Some(2));
}

proptest! {
    #[test]
    fn add_matches_wrapping_add(a in any::<i32>(), b in any::<i32>()) {
        let out = Alu::execute(AluOp::Add, a, b);
        prop_assert_eq!(out.value, a.wrapping_add(b));
        prop_assert_eq!(out.overflow, a.checked_add(b).is_none());
    }

    #[test]
    fn mul_low_word_matches_wide_product(a in any::<i32>(), b in any::<i32>()) {
        let out = Alu::execute(AluOp::Mul, a, b);
        prop_assert_eq!(out.value, wide_mul(a, b) as i32);
        prop_assert_eq!(out.overflow, a.checked_mul(b).is_none());
    }

    #[test]
    fn division_identity_holds(a in any::<i32>(), b in any::<i32>().prop_filter("non-zero", |b| *b != 0)) {
        let (q, r) = divide(a, b);
        let r = r.unwrap();
        prop_assert_eq!(q.value.wrapping_mul(b).wrapping_add(r), a);
    }
}
