//! Core processor implementation.
//!
//! This module contains the execution core and the functional units it drives:
//! the integer ALU, the branch resolution unit, and the data cache.

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Execution units (ALU, branch resolution, data cache).
pub mod units;

pub use self::cpu::{Cpu, SetupError, StepOutcome};
