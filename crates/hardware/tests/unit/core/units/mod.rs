//! Tests for the functional units.

/// Integer ALU.
pub mod alu;


/// Direct-mapped write-back cache.
pub mod cache;
