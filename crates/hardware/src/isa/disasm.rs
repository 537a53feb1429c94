//! Instruction Disassembler.
//!
//! Renders an [`Instruction`] back to the canonical text form accepted by the
//! loader, for debug tracing, logging, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use mipsim_core::isa::instruction::{Instruction, Opcode, Operand};
//! use mipsim_core::isa::disasm::disassemble;
//!
//! let inst = Instruction::new(Opcode::Lw, vec![Operand::Register(1), Operand::Memory { offset: 8, base: 2 }]);
//! assert_eq!(disassemble(&inst), "LW R1,8(R2)");
//! ```

use std::fmt;

use crate::isa::instruction::Instruction;

/// Returns the canonical text of `inst`.
pub fn disassemble(inst: &Instruction) -> String {
    inst.to_string()
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode())?;
        for (i, op) in self.operands().iter().enumerate() {
            let sep = if i == 0 { " " } else { "," };
            write!(f, "{sep}{op}")?;
        }
        Ok(())
    }
}
