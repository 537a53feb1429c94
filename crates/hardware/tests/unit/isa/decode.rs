//! Decoder tests: operand shapes and field ranges.

use mipsim_core::common::{DecodeError, ExecutionError, SimError};
use mipsim_core::isa::{CacheOp, Instruction, Op, Opcode, Operand, decode};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::*;

fn decode_err(inst: &Instruction) -> DecodeError {
    match decode(inst) {
        Err(SimError::Decode(e)) => e,
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[rstest]
#[case(add(1, 2, 3), Op::Add { rd: 1, rs: 2, rt: 3 })]
#[case(sub(4, 5, 6), Op::Sub { rd: 4, rs: 5, rt: 6 })]
#[case(slt(7, 8, 9), Op::Slt { rd: 7, rs: 8, rt: 9 })]
#[case(addi(1, 2, -5), Op::Addi { rt: 1, rs: 2, imm: -5 })]
#[case(subi(1, 2, 5), Op::Subi { rd: 1, rs: 2, imm: 5 })]
#[case(bne(1, 2, -3), Op::Bne { rs: 1, rt: 2, offset: -3 })]
#[case(j(10), Op::J { target: 10 })]
#[case(jal(0), Op::Jal { target: 0 })]
#[case(lw(1, 8, 2), Op::Lw { rt: 1, base: 2, offset: 8 })]
#[case(sw(3, -4, 31), Op::Sw { rt: 3, base: 31, offset: -4 })]
#[case(cache(0), Op::Cache(CacheOp::Disable))]
#[case(cache(1), Op::Cache(CacheOp::Enable))]
#[case(cache(2), Op::Cache(CacheOp::Flush))]
#[case(nop(), Op::Nop)]
#[case(halt(), Op::Halt)]
fn well_formed(#[case] inst: Instruction, #[case] expected: Op) {
    assert_eq!(decode(&inst), Ok(expected));
}

#[test]
fn arity_mismatch() {
    let inst = Instruction::new(Opcode::Add, vec![Operand::Register(1), Operand::Register(2)]);
    assert_eq!(
        decode_err(&inst),
        DecodeError::Arity {
            opcode: "ADD".into(),
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn halt_takes_no_operands() {
    let inst = Instruction::new(Opcode::Halt, vec![Operand::Immediate(1)]);
    assert!(matches!(decode_err(&inst), DecodeError::Arity { expected: 0, .. }));
}

#[test]
fn wrong_operand_kind() {
    let inst = Instruction::new(
        Opcode::Lw,
        vec![Operand::Register(1), Operand::Immediate(8)],
    );
    assert_eq!(
        decode_err(&inst),
        DecodeError::OperandType {
            opcode: "LW".into(),
            position: 1,
            expected: "memory operand",
            found: "immediate"
        }
    );
}

#[test]
fn register_index_must_exist() {
    assert_eq!(
        decode_err(&lw(1, 0, 40)),
        DecodeError::RegisterOutOfRange { index: 40 }
    );
}

#[rstest]
#[case(i64::from(i32::MAX) + 1)]
#[case(i64::from(i32::MIN) - 1)]
fn immediate_must_fit_32_bits(#[case] value: i64) {
    assert_eq!(
        decode_err(&addi(1, 2, value)),
        DecodeError::ImmediateOutOfRange { value }
    );
}

#[rstest]
#[case(32768)]
#[case(-32769)]
fn offsets_must_fit_16_bits(#[case] value: i64) {
    assert_eq!(
        decode_err(&sw(1, value, 2)),
        DecodeError::OffsetOutOfRange { value }
    );
}

#[rstest]
#[case(8192)]
#[case(-8193)]
#[case(32767)]
fn branch_byte_displacement_must_fit_16_bits(#[case] value: i64) {
    assert_eq!(
        decode_err(&bne(1, 2, value)),
        DecodeError::OffsetOutOfRange { value }
    );
}

#[test]
fn branch_offset_limits_are_inclusive() {
    assert!(decode(&bne(1, 2, 8191)).is_ok());
    assert!(decode(&bne(1, 2, -8192)).is_ok());
}

#[test]
fn offset_limits_are_inclusive() {
    assert!(decode(&lw(1, 32767, 0)).is_ok());
    assert!(decode(&lw(1, -32768, 0)).is_ok());
}

#[test]
fn jump_target_must_be_non_negative() {
    assert_eq!(decode_err(&j(-1)), DecodeError::NegativeTarget { value: -1 });
}

#[rstest]
#[case(3)]
#[case(-1)]
fn cache_code_must_be_known(#[case] code: i64) {
    assert_eq!(decode_err(&cache(code)), DecodeError::InvalidCacheCode { code });
}

#[test]
fn unknown_mnemonic_is_an_execution_error() {
    assert_eq!(
        decode(&unknown("mul")),
        Err(SimError::Execution(ExecutionError::UnknownOpcode {
            mnemonic: "mul".into()
        }))
    );
}

#[test]
fn mnemonics_parse_case_insensitively() {
    assert_eq!("aDdI".parse::<Opcode>(), Ok(Opcode::Addi));
    assert_eq!("halt".parse::<Opcode>(), Ok(Opcode::Halt));
    assert_eq!("MUL".parse::<Opcode>(), Ok(Opcode::Unknown("MUL".into())));
}
