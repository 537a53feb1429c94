//! Register File.
//!
//! This module provides the `RegisterFile` struct holding the architectural
//! integer registers. It provides:
//! 1. **Storage:** 32 signed 32-bit registers, all initialised to zero.
//! 2. **Access:** Checked reads and writes by register index.
//! 3. **Observability:** Snapshots and a debug dump of the register state.
//!
//! Register `R0` is an ordinary writable register in this machine; nothing
//! clamps it to zero. `R7` doubles as the link register written by `JAL`.

use super::constants::NUM_REGISTERS;

/// Signed 32-bit register file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [i32; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Callers hold indices validated by the decoder.
    ///
    /// # Returns
    ///
    /// The signed 32-bit value stored in the register, or `0` for an index
    /// outside the file.
    #[inline]
    pub fn read(&self, idx: usize) -> i32 {
        self.regs.get(idx).copied().unwrap_or(0)
    }

    /// Writes a register. Writes to an index outside the file are ignored.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The value to store.
    #[inline]
    pub fn write(&mut self, idx: usize, val: i32) {
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns all register values in index order.
    pub const fn as_slice(&self) -> &[i32] {
        &self.regs
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
