//! Main Execution Loop.
//!
//! This module implements the fetch-decode-execute cycle of the CPU. It performs the following:
//! 1. **Fetch:** Selects the instruction at `pc / 4`, treating `pc == 4 × len` as an implicit HALT.
//! 2. **Decode:** Validates operand shape into a typed [`Op`].
//! 3. **Execute:** Runs the operation through the ALU, BRU, or the memory path.
//! 4. **Fault handling:** Converts the first error into a [`Fault`] and halts the core.
//!
//! Every check that can fail runs before the instruction commits, so a faulting instruction
//! leaves registers, memory, and the program counter as the previous instruction left them.

use tracing::{debug, error, info};

use super::Cpu;
use crate::common::{
    AddressError, ByteAddr, ExecutionError, Fault, INSTRUCTION_SIZE, LINK_REGISTER, SimError,
};
use crate::core::units::alu::{Alu, AluOp};
use crate::core::units::bru::{Bru, Resolution};
use crate::isa::{Op, decode};
use crate::soc::traits::WordMemory;

/// Result of executing a single instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// More instructions remain.
    Continue,
    /// The core stopped normally (HALT or fall-off).
    Halted,
}

impl<M: WordMemory> Cpu<M> {
    /// Runs until HALT, fall-off, or the first fault.
    ///
    /// Calling `run` on a halted core returns immediately: `Ok(())` after a normal halt,
    /// or the stored fault again.
    ///
    /// # Errors
    ///
    /// Returns the [`Fault`] that stopped execution.
    pub fn run(&mut self) -> Result<(), Fault> {
        loop {
            if self.step()? == StepOutcome::Halted {
                return Ok(());
            }
        }
    }

    /// Runs at most `limit` instructions.
    ///
    /// Falling off the end is not an instruction, so a program that retires exactly
    /// `limit` instructions and then reaches its end still halts (and flushes) normally.
    ///
    /// # Errors
    ///
    /// Returns the first [`Fault`], or `ExecutionError::StepLimitExceeded` if the core is
    /// still running after `limit` instructions. The limit fault halts the core like any other.
    pub fn run_with_limit(&mut self, limit: u64) -> Result<(), Fault> {
        for _ in 0..limit {
            if self.step()? == StepOutcome::Halted {
                return Ok(());
            }
        }
        if self.halted {
            return Ok(());
        }
        if self.at_program_end() {
            return self.step().map(|_| ());
        }
        Err(self.raise(ExecutionError::StepLimitExceeded { limit }.into(), self.pc))
    }

    /// Executes exactly one instruction.
    ///
    /// # Errors
    ///
    /// Returns a [`Fault`] tagged with the pc of the failing instruction. The core is
    /// halted afterwards and the fault is retained in [`Cpu::fault`].
    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        if self.halted {
            return self.fault.clone().map_or(Ok(StepOutcome::Halted), Err);
        }
        let pc = self.pc;
        self.execute_at(pc).map_err(|e| self.raise(e, pc))
    }

    fn at_program_end(&self) -> bool {
        self.pc % INSTRUCTION_SIZE == 0 && (self.pc / INSTRUCTION_SIZE) as usize == self.program.len()
    }

    fn raise(&mut self, err: SimError, pc: u32) -> Fault {
        let fault = Fault::new(err, pc);
        error!(pc = %ByteAddr::new(pc), kind = ?fault.kind, "{}", fault.message);
        self.halted = true;
        self.fault = Some(fault.clone());
        fault
    }

    fn execute_at(&mut self, pc: u32) -> Result<StepOutcome, SimError> {
        if pc % INSTRUCTION_SIZE != 0 {
            return Err(AddressError::Misaligned { address: pc }.into());
        }
        let len = self.program.len();
        let index = (pc / INSTRUCTION_SIZE) as usize;
        if index == len {
            debug!(pc = %ByteAddr::new(pc), "end of program reached without HALT");
            self.halt()?;
            return Ok(StepOutcome::Halted);
        }
        let Some(inst) = self.program.get(index) else {
            return Err(ExecutionError::FetchOutOfRange { pc, len }.into());
        };
        if self.trace {
            info!(pc = %ByteAddr::new(pc), "{inst}");
        } else {
            debug!(pc = %ByteAddr::new(pc), "{inst}");
        }

        let op = decode(inst)?;
        let mut resolution = Resolution::FallThrough;
        match op {
            Op::Add { rd, rs, rt } => self.alu(AluOp::Add, rd, rs, self.regs.read(rt)),
            Op::Sub { rd, rs, rt } => self.alu(AluOp::Sub, rd, rs, self.regs.read(rt)),
            Op::Slt { rd, rs, rt } => self.alu(AluOp::Slt, rd, rs, self.regs.read(rt)),
            Op::Addi { rt, rs, imm } => self.alu(AluOp::Add, rt, rs, imm),
            Op::Subi { rd, rs, imm } => self.alu(AluOp::Sub, rd, rs, imm),
            Op::Bne { rs, rt, offset } => {
                resolution = Bru::bne(pc, self.regs.read(rs), self.regs.read(rt), offset);
                match resolution {
                    Resolution::Redirect(target) if target < 0 => {
                        return Err(ExecutionError::JumpOutOfRange { target, len }.into());
                    }
                    Resolution::Redirect(_) => self.stats.branches_taken += 1,
                    Resolution::FallThrough => self.stats.branches_not_taken += 1,
                }
                self.stats.inst_branch += 1;
            }
            Op::J { target } => {
                resolution = Bru::jump(target);
                check_jump(target, len)?;
                self.stats.inst_jump += 1;
            }
            Op::Jal { target } => {
                resolution = Bru::jump(target);
                check_jump(target, len)?;
                self.regs.write(LINK_REGISTER, Bru::link_address(pc));
                self.stats.inst_jump += 1;
            }
            Op::Lw { rt, base, offset } => {
                let addr = ByteAddr::effective(self.regs.read(base), offset)?;
                let value = self.load(addr)?;
                self.regs.write(rt, value);
                self.stats.inst_load += 1;
            }
            Op::Sw { rt, base, offset } => {
                let addr = ByteAddr::effective(self.regs.read(base), offset)?;
                self.store(addr, self.regs.read(rt))?;
                self.stats.inst_store += 1;
            }
            Op::Cache(op) => {
                self.cache_control(op)?;
                self.stats.inst_system += 1;
            }
            Op::Nop => self.stats.inst_system += 1,
            Op::Halt => {
                self.halt()?;
                self.pc = pc.wrapping_add(INSTRUCTION_SIZE);
                self.stats.inst_system += 1;
                self.stats.instructions_retired += 1;
                return Ok(StepOutcome::Halted);
            }
        }

        self.pc = match resolution {
            Resolution::FallThrough => pc.wrapping_add(INSTRUCTION_SIZE),
            Resolution::Redirect(target) => {
                let target = u32::try_from(target).map_err(|_| ExecutionError::JumpOutOfRange {
                    target,
                    len,
                })?;
                Bru::index_to_pc(target)
            }
        };
        self.stats.instructions_retired += 1;
        Ok(StepOutcome::Continue)
    }

    fn alu(&mut self, op: AluOp, rd: usize, rs: usize, b: i32) {
        let result = Alu::execute(op, self.regs.read(rs), b);
        self.regs.write(rd, result);
        self.stats.inst_alu += 1;
    }
}

/// J/JAL must land on an instruction of the program.
const fn check_jump(target: u32, len: usize) -> Result<(), ExecutionError> {
    if (target as usize) < len {
        Ok(())
    } else {
        Err(ExecutionError::JumpOutOfRange {
            target: target as i64,
            len,
        })
    }
}
