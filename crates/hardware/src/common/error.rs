//! Error taxonomy for the simulator.
//!
//! This module defines every fatal condition the execution core can report. It provides:
//! 1. **Address Errors:** Alignment and bounds violations in memory or cache access.
//! 2. **Decode Errors:** Instructions whose operand shape does not match their opcode.
//! 3. **Execution Errors:** Unknown opcodes, runaway control flow, and step-limit exhaustion.
//! 4. **Faults:** The structured `{kind, message, pc}` record handed to reporting.
//!
//! None of these are retried. A run stops at the first one and the caller decides how to
//! present it.

use serde::Serialize;
use thiserror::Error;

/// Alignment or bounds violation on a memory access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The byte address is not a multiple of the word size.
    #[error("unaligned word access at byte address {address:#x}")]
    Misaligned {
        /// Offending byte address.
        address: u32,
    },

    /// The byte address lies outside `[0, capacity)`.
    #[error("byte address {address:#x} out of range (capacity {capacity:#x} bytes)")]
    OutOfRange {
        /// Offending byte address.
        address: u32,
        /// Capacity of the accessed memory in bytes.
        capacity: u32,
    },

    /// The effective address computed from base and offset is negative.
    #[error("effective address {address} is negative")]
    Negative {
        /// The signed sum that produced the address.
        address: i64,
    },
}

/// Malformed instruction shape.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Wrong number of operands for the opcode.
    #[error("{opcode} expects {expected} operand(s), got {found}")]
    Arity {
        /// Mnemonic being decoded.
        opcode: String,
        /// Operand count the opcode requires.
        expected: usize,
        /// Operand count supplied.
        found: usize,
    },

    /// An operand has the wrong kind for its position.
    #[error("{opcode} operand {position}: expected {expected}, got {found}")]
    OperandType {
        /// Mnemonic being decoded.
        opcode: String,
        /// Zero-based operand position.
        position: usize,
        /// Operand kind required at that position.
        expected: &'static str,
        /// Operand kind supplied.
        found: &'static str,
    },

    /// A register index is not in `0..32`.
    #[error("register R{index} does not exist")]
    RegisterOutOfRange {
        /// The register index supplied.
        index: u32,
    },

    /// An immediate does not fit in a signed 32-bit word.
    #[error("immediate {value} does not fit in 32 bits")]
    ImmediateOutOfRange {
        /// The immediate supplied.
        value: i64,
    },

    /// A memory offset, or a branch's byte displacement, does not fit in a signed 16-bit field.
    #[error("offset {value} does not fit in a 16-bit displacement")]
    OffsetOutOfRange {
        /// The offset supplied.
        value: i64,
    },

    /// A jump target is negative.
    #[error("jump target {value} is negative")]
    NegativeTarget {
        /// The target supplied.
        value: i64,
    },

    /// `CACHE` code is not 0, 1 or 2.
    #[error("invalid CACHE code {code} (expected 0, 1 or 2)")]
    InvalidCacheCode {
        /// The code supplied.
        code: i64,
    },
}

/// Failure of the fetch-execute loop itself.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The opcode is not part of the instruction set.
    #[error("unknown opcode `{mnemonic}`")]
    UnknownOpcode {
        /// Mnemonic as it appeared in the program.
        mnemonic: String,
    },

    /// The program counter points past the end of the program without a HALT.
    #[error("fetch at pc {pc:#x} beyond end of program ({len} instructions)")]
    FetchOutOfRange {
        /// Program counter at fetch time.
        pc: u32,
        /// Number of loaded instructions.
        len: usize,
    },

    /// A jump or taken branch targets an instruction outside the program.
    #[error("control transfer to instruction {target} outside program ({len} instructions)")]
    JumpOutOfRange {
        /// Target instruction index.
        target: i64,
        /// Number of loaded instructions.
        len: usize,
    },

    /// The caller-supplied instruction ceiling was reached before HALT.
    #[error("instruction limit of {limit} reached without HALT")]
    StepLimitExceeded {
        /// The ceiling that was hit.
        limit: u64,
    },
}

/// Any fatal simulator error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// See [`AddressError`].
    #[error(transparent)]
    Address(#[from] AddressError),
    /// See [`DecodeError`].
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// See [`ExecutionError`].
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Coarse classification of a [`SimError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Alignment or bounds violation.
    AddressError,
    /// Malformed instruction shape.
    DecodeError,
    /// Unknown opcode or runaway control flow.
    ExecutionError,
}

impl SimError {
    /// Returns the coarse classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Address(_) => ErrorKind::AddressError,
            Self::Decode(_) => ErrorKind::DecodeError,
            Self::Execution(_) => ErrorKind::ExecutionError,
        }
    }
}

/// A fatal error together with the program counter of the faulting instruction.
///
/// This is what `Cpu::run` hands back to its caller. Architectural state is left
/// exactly as the previous instruction committed it.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("{kind:?} at pc {pc:#x}: {message}")]
pub struct Fault {
    /// Error classification.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Program counter of the faulting instruction.
    pub pc: u32,
    /// The underlying error.
    #[serde(skip)]
    #[source]
    pub error: SimError,
}

impl Fault {
    /// Wraps `error` raised while executing the instruction at `pc`.
    pub fn new(error: SimError, pc: u32) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            pc,
            error,
        }
    }
}
