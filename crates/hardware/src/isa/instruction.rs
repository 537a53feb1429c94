//! Instruction records.
//!
//! Provides the loader-facing representation of an instruction: an opcode and an
//! ordered list of typed operands. Records are immutable once created; the core
//! turns them into executable [`Op`](crate::isa::decode::Op)s with
//! [`decode`](crate::isa::decode::decode).

use std::fmt;
use std::str::FromStr;

/// Instruction mnemonics.
///
/// `Unknown` keeps the text of a mnemonic that is not in the instruction set,
/// so the program still loads and the failure surfaces when that instruction executes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `ADD Rd,Rs,Rt`
    Add,
    /// `ADDI Rt,Rs,immd`
    Addi,
    /// `SUB Rd,Rs,Rt`
    Sub,
    /// `SUBI Rd,Rs,immd`
    Subi,
    /// `SLT Rd,Rs,Rt`
    Slt,
    /// `BNE Rs,Rt,offset`
    Bne,
    /// `J target`
    J,
    /// `JAL target`
    Jal,
    /// `LW Rt,offset(Rs)`
    Lw,
    /// `SW Rt,offset(Rs)`
    Sw,
    /// `CACHE code`
    Cache,
    /// `NOP`
    Nop,
    /// `HALT`
    Halt,
    /// Anything else.
    Unknown(String),
}

impl Opcode {
    /// Returns the canonical upper-case mnemonic.
    pub fn mnemonic(&self) -> &str {
        match self {
            Self::Add => "ADD",
            Self::Addi => "ADDI",
            Self::Sub => "SUB",
            Self::Subi => "SUBI",
            Self::Slt => "SLT",
            Self::Bne => "BNE",
            Self::J => "J",
            Self::Jal => "JAL",
            Self::Lw => "LW",
            Self::Sw => "SW",
            Self::Cache => "CACHE",
            Self::Nop => "NOP",
            Self::Halt => "HALT",
            Self::Unknown(s) => s,
        }
    }
}

impl FromStr for Opcode {
    type Err = std::convert::Infallible;

    /// Parses a mnemonic case-insensitively. Never fails; unrecognised text becomes
    /// `Opcode::Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "ADD" => Self::Add,
            "ADDI" => Self::Addi,
            "SUB" => Self::Sub,
            "SUBI" => Self::Subi,
            "SLT" => Self::Slt,
            "BNE" => Self::Bne,
            "J" => Self::J,
            "JAL" => Self::Jal,
            "LW" => Self::Lw,
            "SW" => Self::Sw,
            "CACHE" => Self::Cache,
            "NOP" => Self::Nop,
            "HALT" => Self::Halt,
            _ => Self::Unknown(s.to_string()),
        })
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A typed instruction operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Register index (`R3` → 3).
    Register(u32),
    /// Signed integer: immediate, branch offset, jump target, or cache code.
    Immediate(i64),
    /// `offset(Rbase)` memory operand.
    Memory {
        /// Signed byte offset.
        offset: i64,
        /// Base register index.
        base: u32,
    },
}

impl Operand {
    /// Short name of the operand kind, used in decode errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
            Self::Immediate(_) => "immediate",
            Self::Memory { .. } => "memory operand",
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(r) => write!(f, "R{r}"),
            Self::Immediate(v) => write!(f, "{v}"),
            Self::Memory { offset, base } => write!(f, "{offset}(R{base})"),
        }
    }
}

/// A loaded instruction: opcode plus operands in source order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    opcode: Opcode,
    operands: Vec<Operand>,
}

impl Instruction {
    /// Creates an instruction record.
    pub const fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self { opcode, operands }
    }

    /// Returns the opcode.
    pub const fn opcode(&self) -> &Opcode {
        &self.opcode
    }

    /// Returns the operands in source order.
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }
}
