//! Fault reporting: every error stops the run, carries the faulting pc, and leaves
//! state as the previous instruction committed it.

use mipsim_core::common::{
    AddressError, DecodeError, ErrorKind, ExecutionError, SimError,
};
use mipsim_core::core::StepOutcome;
use mipsim_core::isa::{Instruction, Opcode, Operand};
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::*;
use crate::common::harness::TestContext;

#[test]
fn unaligned_load_stops_with_prior_state() {
    let mut ctx = TestContext::new(vec![addi(1, 0, 3), addi(2, 0, 9), lw(3, 0, 1), addi(4, 0, 1)]);
    let before = {
        ctx.step_n(2);
        ctx.cpu.registers().to_vec()
    };

    let fault = ctx.run().unwrap_err();
    assert_eq!(fault.kind, ErrorKind::AddressError);
    assert_eq!(fault.pc, 8);
    assert_eq!(
        fault.error,
        SimError::Address(AddressError::Misaligned { address: 3 })
    );
    assert_eq!(ctx.cpu.registers(), before.as_slice());
    assert_eq!(ctx.cpu.pc(), 8);
    assert!(ctx.cpu.halted());
    assert_eq!(ctx.cpu.fault(), Some(&fault));
}

#[test]
fn unaligned_store_leaves_memory_untouched() {
    let mut ctx = TestContext::cached(vec![sw(1, 2, 0), halt()]);
    ctx.set_reg(1, 5);
    assert!(ctx.run().is_err());
    assert!(ctx.cpu.memory().words().iter().all(|&w| w == 0));
    assert!(ctx.cpu.cache().unwrap().lines().iter().all(|l| !l.is_valid()));
}

#[test]
fn out_of_range_load_faults() {
    let mut ctx = TestContext::new(vec![lw(1, 0, 2), halt()]);
    ctx.set_reg(2, 4096);
    let fault = ctx.run().unwrap_err();
    assert_eq!(
        fault.error,
        SimError::Address(AddressError::OutOfRange {
            address: 4096,
            capacity: 4096
        })
    );
}

#[test]
fn negative_effective_address_faults() {
    let mut ctx = TestContext::new(vec![sw(1, -8, 0), halt()]);
    let fault = ctx.run().unwrap_err();
    assert_eq!(
        fault.error,
        SimError::Address(AddressError::Negative { address: -8 })
    );
}

#[test]
fn unknown_opcode_faults_when_reached() {
    let mut ctx = TestContext::new(vec![addi(1, 0, 1), unknown("MUL"), halt()]);
    let fault = ctx.run().unwrap_err();
    assert_eq!(fault.kind, ErrorKind::ExecutionError);
    assert_eq!(fault.pc, 4);
    assert_eq!(
        fault.error,
        SimError::Execution(ExecutionError::UnknownOpcode {
            mnemonic: "MUL".into()
        })
    );
    assert_eq!(ctx.get_reg(1), 1);
}

#[test]
fn malformed_operands_are_decode_errors() {
    let bad = Instruction::new(
        Opcode::Add,
        vec![Operand::Register(1), Operand::Register(2), Operand::Immediate(3)],
    );
    let mut ctx = TestContext::new(vec![bad, halt()]);
    let fault = ctx.run().unwrap_err();
    assert_eq!(fault.kind, ErrorKind::DecodeError);
    assert_eq!(fault.pc, 0);
}

#[test]
fn register_index_out_of_range_is_a_decode_error() {
    let mut ctx = TestContext::new(vec![add(32, 1, 1), halt()]);
    let fault = ctx.run().unwrap_err();
    assert_eq!(
        fault.error,
        SimError::Decode(DecodeError::RegisterOutOfRange { index: 32 })
    );
}

#[test]
fn jal_out_of_range_does_not_link() {
    let mut ctx = TestContext::new(vec![nop(), jal(9)]);
    assert!(ctx.run().is_err());
    assert_eq!(ctx.get_reg(7), 0);
    assert_eq!(ctx.cpu.pc(), 4);
}

#[test]
fn fault_is_sticky() {
    let mut ctx = TestContext::new(vec![unknown("BOGUS"), halt()]);
    let first = ctx.step().unwrap_err();
    assert_eq!(ctx.step(), Err(first.clone()));
    assert_eq!(ctx.cpu.run(), Err(first));
}

#[test]
fn step_limit_stops_infinite_loop() {
    let mut ctx = TestContext::new(vec![nop(), j(0)]);
    let fault = ctx.cpu.run_with_limit(50).unwrap_err();
    assert_eq!(
        fault.error,
        SimError::Execution(ExecutionError::StepLimitExceeded { limit: 50 })
    );
    assert!(ctx.cpu.halted());
    assert_eq!(ctx.cpu.stats().instructions_retired, 50);
}

#[test]
fn step_limit_not_hit_by_terminating_program() {
    let mut ctx = TestContext::new(vec![nop(), halt()]);
    assert_eq!(ctx.cpu.run_with_limit(2), Ok(()));
    assert_eq!(ctx.step(), Ok(StepOutcome::Halted));
}

#[test]
fn step_limit_allows_falling_off_after_last_instruction() {
    let mut ctx = TestContext::new(vec![nop(), nop()]);
    assert_eq!(ctx.cpu.run_with_limit(2), Ok(()));
    assert!(ctx.cpu.halted());
    assert!(ctx.cpu.fault().is_none());
    assert_eq!(ctx.cpu.pc(), 8);
}

#[test]
fn fall_off_at_step_limit_still_flushes() {
    let mut ctx = TestContext::cached(vec![addi(1, 0, 42), sw(1, 8, 0)]);
    assert_eq!(ctx.cpu.run_with_limit(2), Ok(()));
    assert_eq!(ctx.mem(8), 42);
}

#[test]
fn step_limit_still_applies_when_short_of_the_end() {
    let mut ctx = TestContext::new(vec![nop(), nop(), nop()]);
    let fault = ctx.cpu.run_with_limit(2).unwrap_err();
    assert_eq!(
        fault.error,
        SimError::Execution(ExecutionError::StepLimitExceeded { limit: 2 })
    );
    assert_eq!(fault.pc, 8);
}
