//! Instruction Decoder.
//!
//! This module turns a loaded [`Instruction`] into an executable [`Op`]. It checks
//! operand count and kind per opcode, register indices, and the ranges of
//! immediates, offsets, jump targets, and cache codes. An unknown mnemonic is an
//! execution error, not a decode error: the shape of an unknown instruction is
//! meaningless.

use crate::common::constants::{
    BRANCH_OFFSET_MAX, BRANCH_OFFSET_MIN, NUM_REGISTERS, OFFSET_MAX, OFFSET_MIN,
};
use crate::common::{DecodeError, ExecutionError, SimError};
use crate::isa::instruction::{Instruction, Opcode, Operand};

/// Action requested by a `CACHE` instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheOp {
    /// Code 0: write back, invalidate and stop routing through the cache.
    Disable,
    /// Code 1: route loads and stores through the cache.
    Enable,
    /// Code 2: one-shot write-back of all dirty lines.
    Flush,
}

impl CacheOp {
    /// Maps an instruction code to its action.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Disable),
            1 => Some(Self::Enable),
            2 => Some(Self::Flush),
            _ => None,
        }
    }
}

/// A fully decoded, executable instruction.
///
/// Register fields are indices already checked against the register file size.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Add { rd: usize, rs: usize, rt: usize },
    Addi { rt: usize, rs: usize, imm: i32 },
    Sub { rd: usize, rs: usize, rt: usize },
    Subi { rd: usize, rs: usize, imm: i32 },
    Slt { rd: usize, rs: usize, rt: usize },
    /// `offset` counts instructions relative to `pc + 4`.
    Bne { rs: usize, rt: usize, offset: i32 },
    /// `target` is an absolute instruction index.
    J { target: u32 },
    Jal { target: u32 },
    Lw { rt: usize, base: usize, offset: i32 },
    Sw { rt: usize, base: usize, offset: i32 },
    Cache(CacheOp),
    Nop,
    Halt,
}

/// Positional operand reader for one instruction.
struct Operands<'a> {
    opcode: &'a Opcode,
    ops: &'a [Operand],
}

impl<'a> Operands<'a> {
    fn new(inst: &'a Instruction, expected: usize) -> Result<Self, DecodeError> {
        let ops = inst.operands();
        if ops.len() != expected {
            return Err(DecodeError::Arity {
                opcode: inst.opcode().to_string(),
                expected,
                found: ops.len(),
            });
        }
        Ok(Self {
            opcode: inst.opcode(),
            ops,
        })
    }

    fn mismatch(&self, position: usize, expected: &'static str) -> DecodeError {
        DecodeError::OperandType {
            opcode: self.opcode.to_string(),
            position,
            expected,
            found: self.ops[position].kind(),
        }
    }

    fn reg(&self, position: usize) -> Result<usize, DecodeError> {
        match self.ops[position] {
            Operand::Register(index) => check_register(index),
            _ => Err(self.mismatch(position, "register")),
        }
    }

    fn imm(&self, position: usize) -> Result<i64, DecodeError> {
        match self.ops[position] {
            Operand::Immediate(value) => Ok(value),
            _ => Err(self.mismatch(position, "immediate")),
        }
    }

    fn mem(&self, position: usize) -> Result<(i32, usize), DecodeError> {
        match self.ops[position] {
            Operand::Memory { offset, base } => Ok((check_offset(offset)?, check_register(base)?)),
            _ => Err(self.mismatch(position, "memory operand")),
        }
    }
}

fn check_register(index: u32) -> Result<usize, DecodeError> {
    let idx = index as usize;
    if idx < NUM_REGISTERS {
        Ok(idx)
    } else {
        Err(DecodeError::RegisterOutOfRange { index })
    }
}

fn check_immediate(value: i64) -> Result<i32, DecodeError> {
    i32::try_from(value).map_err(|_| DecodeError::ImmediateOutOfRange { value })
}

fn check_offset(value: i64) -> Result<i32, DecodeError> {
    if (OFFSET_MIN..=OFFSET_MAX).contains(&value) {
        Ok(value as i32)
    } else {
        Err(DecodeError::OffsetOutOfRange { value })
    }
}

/// BNE counts instructions, so its byte displacement is the value that must fit 16 bits.
fn check_branch_offset(value: i64) -> Result<i32, DecodeError> {
    if (BRANCH_OFFSET_MIN..=BRANCH_OFFSET_MAX).contains(&value) {
        Ok(value as i32)
    } else {
        Err(DecodeError::OffsetOutOfRange { value })
    }
}

fn check_target(value: i64) -> Result<u32, DecodeError> {
    if value < 0 {
        return Err(DecodeError::NegativeTarget { value });
    }
    u32::try_from(value).map_err(|_| DecodeError::ImmediateOutOfRange { value })
}

/// Decodes `inst` into an executable [`Op`].
///
/// # Errors
///
/// * `ExecutionError::UnknownOpcode` for a mnemonic outside the instruction set.
/// * `DecodeError` for wrong operand count, operand kind, or out-of-range fields.
pub fn decode(inst: &Instruction) -> Result<Op, SimError> {
    let three_regs = |inst: &Instruction| -> Result<(usize, usize, usize), DecodeError> {
        let o = Operands::new(inst, 3)?;
        Ok((o.reg(0)?, o.reg(1)?, o.reg(2)?))
    };
    let reg_reg_imm = |inst: &Instruction| -> Result<(usize, usize, i32), DecodeError> {
        let o = Operands::new(inst, 3)?;
        Ok((o.reg(0)?, o.reg(1)?, check_immediate(o.imm(2)?)?))
    };
    let reg_mem = |inst: &Instruction| -> Result<(usize, i32, usize), DecodeError> {
        let o = Operands::new(inst, 2)?;
        let (offset, base) = o.mem(1)?;
        Ok((o.reg(0)?, offset, base))
    };
    let target = |inst: &Instruction| -> Result<u32, DecodeError> {
        let o = Operands::new(inst, 1)?;
        check_target(o.imm(0)?)
    };

    let op = match inst.opcode() {
        Opcode::Add => {
            let (rd, rs, rt) = three_regs(inst)?;
            Op::Add { rd, rs, rt }
        }
        Opcode::Sub => {
            let (rd, rs, rt) = three_regs(inst)?;
            Op::Sub { rd, rs, rt }
        }
        Opcode::Slt => {
            let (rd, rs, rt) = three_regs(inst)?;
            Op::Slt { rd, rs, rt }
        }
        Opcode::Addi => {
            let (rt, rs, imm) = reg_reg_imm(inst)?;
            Op::Addi { rt, rs, imm }
        }
        Opcode::Subi => {
            let (rd, rs, imm) = reg_reg_imm(inst)?;
            Op::Subi { rd, rs, imm }
        }
        Opcode::Bne => {
            let o = Operands::new(inst, 3)?;
            Op::Bne {
                rs: o.reg(0)?,
                rt: o.reg(1)?,
                offset: check_branch_offset(o.imm(2)?)?,
            }
        }
        Opcode::J => Op::J {
            target: target(inst)?,
        },
        Opcode::Jal => Op::Jal {
            target: target(inst)?,
        },
        Opcode::Lw => {
            let (rt, offset, base) = reg_mem(inst)?;
            Op::Lw { rt, base, offset }
        }
        Opcode::Sw => {
            let (rt, offset, base) = reg_mem(inst)?;
            Op::Sw { rt, base, offset }
        }
        Opcode::Cache => {
            let code = Operands::new(inst, 1)?.imm(0)?;
            Op::Cache(CacheOp::from_code(code).ok_or(DecodeError::InvalidCacheCode { code })?)
        }
        Opcode::Nop => {
            let _ = Operands::new(inst, 0)?;
            Op::Nop
        }
        Opcode::Halt => {
            let _ = Operands::new(inst, 0)?;
            Op::Halt
        }
        Opcode::Unknown(mnemonic) => {
            return Err(ExecutionError::UnknownOpcode {
                mnemonic: mnemonic.clone(),
            }
            .into());
        }
    };
    Ok(op)
}
