//! Execution units and functional components.
//!
//! This module contains the integer ALU, the branch resolution unit, and the
//! direct-mapped data cache.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit (branch and jump target computation).
pub mod bru;

/// Direct-mapped write-back data cache.
pub mod cache;
