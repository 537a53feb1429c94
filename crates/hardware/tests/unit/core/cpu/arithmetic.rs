//! Register-to-register and immediate arithmetic.

use mipsim_core::isa::Instruction;
use rstest::rstest;

use crate::common::builder::instruction::*;
use crate::common::harness::TestContext;

#[rstest]
#[case::add(add(1, 2, 3), 7, 5, 12)]
#[case::add_negative(add(1, 2, 3), -7, 5, -2)]
#[case::add_wraps(add(1, 2, 3), i32::MAX, 1, i32::MIN)]
#[case::sub(sub(1, 2, 3), 7, 5, 2)]
#[case::sub_wraps(sub(1, 2, 3), i32::MIN, 1, i32::MAX)]
#[case::slt_true(slt(1, 2, 3), -3, 2, 1)]
#[case::slt_false(slt(1, 2, 3), 2, -3, 0)]
#[case::slt_equal(slt(1, 2, 3), 4, 4, 0)]
fn three_register_ops(
    #[case] inst: Instruction,
    #[case] a: i32,
    #[case] b: i32,
    #[case] expected: i32,
) {
    let mut ctx = TestContext::new(vec![inst, halt()]);
    ctx.set_reg(2, a);
    ctx.set_reg(3, b);
    ctx.run().unwrap();
    assert_eq!(ctx.get_reg(1), expected);
}

#[rstest]
#[case::addi(addi(1, 2, 5), 10, 15)]
#[case::addi_negative(addi(1, 2, -15), 10, -5)]
#[case::addi_wraps(addi(1, 2, 1), i32::MAX, i32::MIN)]
#[case::subi(subi(1, 2, 5), 10, 5)]
#[case::subi_negative_immediate(subi(1, 2, -5), 10, 15)]
#[case::subi_wraps(subi(1, 2, 1), i32::MIN, i32::MAX)]
fn immediate_ops(#[case] inst: Instruction, #[case] a: i32, #[case] expected: i32) {
    let mut ctx = TestContext::new(vec![inst, halt()]);
    ctx.set_reg(2, a);
    ctx.run().unwrap();
    assert_eq!(ctx.get_reg(1), expected);
}

#[test]
fn pc_advances_by_four_per_instruction() {
    let mut ctx = TestContext::new(vec![addi(1, 0, 1), addi(2, 0, 2), nop(), halt()]);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.pc(), 4);
    ctx.step_n(2);
    assert_eq!(ctx.cpu.pc(), 12);
}

#[test]
fn destination_may_alias_a_source() {
    let mut ctx = TestContext::new(vec![add(1, 1, 1), halt()]);
    ctx.set_reg(1, 21);
    ctx.run().unwrap();
    assert_eq!(ctx.get_reg(1), 42);
}

/// R0 has no hardwired zero: it can be written and read back like any register.
#[test]
fn r0_is_an_ordinary_register() {
    let mut ctx = TestContext::new(vec![addi(0, 0, 5), add(1, 0, 0), halt()]);
    ctx.run().unwrap();
    assert_eq!(ctx.get_reg(0), 5);
    assert_eq!(ctx.get_reg(1), 10);
}

#[test]
fn alu_instructions_are_counted() {
    let mut ctx = TestContext::new(vec![addi(1, 0, 1), sub(2, 1, 1), slt(3, 2, 1), halt()]);
    ctx.run().unwrap();
    let stats = ctx.cpu.stats();
    assert_eq!(stats.inst_alu, 3);
    assert_eq!(stats.inst_system, 1);
    assert_eq!(stats.instructions_retired, 4);
}
