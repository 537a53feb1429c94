//! Branch Resolution Unit (BRU).
//!
//! Computes control-flow targets. There is no prediction: every branch is
//! resolved in the instruction that issues it.
//!
//! - `BNE`: `pc ← (pc + 4) + offset × 4` when the operands differ.
//! - `J`/`JAL`: `pc ← target × 4`; `JAL` also links `pc + 4`.

use crate::common::INSTRUCTION_SIZE;

/// Outcome of resolving a control-transfer instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Continue at `pc + 4`.
    FallThrough,
    /// Continue at the given instruction index. May be negative or past the end of
    /// the program; the core validates it.
    Redirect(i64),
}

/// Branch Resolution Unit.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Resolves a `BNE`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Byte address of the branch.
    /// * `rs`, `rt` - Compared register values.
    /// * `offset` - Signed instruction count relative to the next instruction.
    pub fn bne(pc: u32, rs: i32, rt: i32, offset: i32) -> Resolution {
        if rs == rt {
            Resolution::FallThrough
        } else {
            let next = i64::from(pc / INSTRUCTION_SIZE) + 1;
            Resolution::Redirect(next + i64::from(offset))
        }
    }

    /// Resolves an absolute jump to instruction index `target`.
    pub fn jump(target: u32) -> Resolution {
        Resolution::Redirect(i64::from(target))
    }

    /// Return address written to the link register by `JAL` at `pc`.
    pub const fn link_address(pc: u32) -> i32 {
        pc.wrapping_add(INSTRUCTION_SIZE) as i32
    }

    /// Converts an instruction index to its byte address.
    pub const fn index_to_pc(index: u32) -> u32 {
        index.wrapping_mul(INSTRUCTION_SIZE)
    }
}
