//! ALU tests.

use mipsim_core::core::units::alu::{Alu, AluOp};
use rstest::rstest;

#[rstest]
#[case(AluOp::Add, 2, 3, 5)]
#[case(AluOp::Add, -2, 3, 1)]
#[case(AluOp::Add, i32::MAX, 1, i32::MIN)]
#[case(AluOp::Sub, 10, 3, 7)]
#[case(AluOp::Sub, 3, 10, -7)]
#[case(AluOp::Sub, i32::MIN, 1, i32::MAX)]
#[case(AluOp::Slt, -1, 0, 1)]
#[case(AluOp::Slt, 0, -1, 0)]
#[case(AluOp::Slt, 5, 5, 0)]
fn execute(#[case] op: AluOp, #[case] a: i32, #[case] b: i32, #[case] expected: i32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}
