//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the instruction record produced by the loader, the decoder that turns it
//! into an executable operation, and the disassembler used for tracing.
//!
//! # Instruction set
//!
//! `ADD`, `ADDI`, `SUB`, `SUBI`, `SLT`, `BNE`, `J`, `JAL`, `LW`, `SW`, `CACHE`,
//! `NOP`, `HALT`.

/// Operand and opcode validation producing executable operations.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction records (opcode plus typed operands).
pub mod instruction;

pub use decode::{CacheOp, Op, decode};
pub use instruction::{Instruction, Opcode, Operand};
