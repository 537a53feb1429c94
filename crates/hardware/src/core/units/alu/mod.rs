//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by the execution core. All
//! operands and results are signed 32-bit words; overflow wraps per
//! two's-complement arithmetic and never traps.

/// ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `a + b`, wrapping.
    Add,
    /// `a - b`, wrapping.
    Sub,
    /// `1` if `a < b` (signed) else `0`.
    Slt,
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (register value or sign-extended immediate)
    ///
    /// # Returns
    ///
    /// The 32-bit result of the operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use mipsim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), i32::MIN); // wraps
    /// assert_eq!(Alu::execute(AluOp::Slt, -5, 10), 1);
    /// ```
    #[inline]
    pub const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Slt => (a < b) as i32,
        }
    }
}
