//! MIPS-style instruction-level simulator library.
//!
//! This crate implements a single-cycle-per-instruction simulator with the following:
//! 1. **Core:** Fetch-decode-execute loop over a preloaded program, register file, and PC.
//! 2. **Memory:** Word-addressed backing store behind an optional direct-mapped write-back cache.
//! 3. **ISA:** Instruction records, operand validation, and disassembly.
//! 4. **Simulation:** Text loaders, configuration, statistics, and the end-of-run report.

/// Common types and constants (addresses, registers, errors).
pub mod common;
/// Simulator configuration (memory size, cache geometry, run limits).
pub mod config;
/// CPU core (execution loop, ALU, branch unit, data cache).
pub mod core;
/// Instruction set (records, decode, disassembly).
pub mod isa;
/// Program/memory loaders, report, and simulator facade.
pub mod sim;
/// Backing store and memory traits.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, program, memory, cache, and stats.
pub use crate::core::Cpu;
/// Configured simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Word-addressed backing store.
pub use crate::soc::MemoryBus;
