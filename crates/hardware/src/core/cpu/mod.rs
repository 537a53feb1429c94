//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains the register file, program counter, and halt state.
//! 2. **Program Storage:** Holds the preloaded, read-only instruction sequence.
//! 3. **Memory Hierarchy:** Owns the backing store and the optional data cache in front of it.
//! 4. **Observability:** Read-only snapshots of registers, memory, statistics, and faults.

/// Fetch-decode-execute loop.
pub mod execution;

/// Load/store routing and cache control.
pub mod memory;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::common::{AddressError, Fault, RegisterFile};
use crate::config::{Config, ConfigError};
use crate::core::units::cache::{Cache, CacheGeometry};
use crate::isa::Instruction;
use crate::soc::MemoryBus;
use crate::soc::traits::WordMemory;
use crate::stats::SimStats;

pub use self::execution::StepOutcome;

/// Failure to assemble a CPU from configuration and a memory image.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The memory image addresses a word outside memory or unaligned.
    #[error("memory image: {0}")]
    Memory(#[from] AddressError),
}

/// Main CPU structure containing all processor state and components.
///
/// The CPU exclusively owns its backing store `M` and its optional cache; nothing is
/// shared between instances, so every run is an isolated unit of work.
#[derive(Debug)]
pub struct Cpu<M: WordMemory = MemoryBus> {
    regs: RegisterFile,
    pc: u32,
    program: Vec<Instruction>,
    memory: M,
    cache: Option<Cache>,
    halted: bool,
    fault: Option<Fault>,
    stats: SimStats,
    trace: bool,
}

impl<M: WordMemory> Cpu<M> {
    /// Creates a CPU with `pc = 0`, zeroed registers, and the given program.
    ///
    /// # Arguments
    ///
    /// * `program` - Decoded instruction records, one per instruction slot.
    /// * `memory` - Backing store; the ground truth for all data.
    /// * `cache` - Optional data cache. Its enabled state is kept as given.
    pub fn new(program: Vec<Instruction>, memory: M, cache: Option<Cache>) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            program,
            memory,
            cache,
            halted: false,
            fault: None,
            stats: SimStats::default(),
            trace: cfg!(feature = "always-trace"),
        }
    }

    /// Logs every executed instruction at `info` instead of `debug` level.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace || cfg!(feature = "always-trace");
    }

    /// Returns `true` once HALT executed, the program ran off its end, or a fault occurred.
    pub const fn halted(&self) -> bool {
        self.halted
    }

    /// Returns the program counter (byte address of the next instruction).
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Overrides the program counter. Intended for test harnesses and debuggers.
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    /// Returns all register values in index order.
    pub const fn registers(&self) -> &[i32] {
        self.regs.as_slice()
    }

    /// Returns the register file.
    pub const fn regs(&self) -> &RegisterFile {
        &self.regs
    }

    /// Writes a register. Intended for test harnesses and debuggers.
    pub fn set_register(&mut self, idx: usize, value: i32) {
        self.regs.write(idx, value);
    }

    /// Returns the loaded program.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    /// Returns the backing store. Dirty cached words are not reflected until written back.
    pub const fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns the backing store mutably.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Returns the data cache, if one is attached.
    pub const fn cache(&self) -> Option<&Cache> {
        self.cache.as_ref()
    }

    /// Returns the fault that stopped execution, if any.
    pub const fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Returns a snapshot of the execution statistics including cache counters.
    pub fn stats(&self) -> SimStats {
        let mut stats = self.stats;
        if let Some(cache) = &self.cache {
            stats.cache = *cache.stats();
        }
        stats
    }
}

impl Cpu<MemoryBus> {
    /// Builds a CPU with a `MemoryBus` and cache sized from `config`.
    ///
    /// # Arguments
    ///
    /// * `program` - Decoded instruction records.
    /// * `image` - Initial memory contents, byte address → value.
    /// * `config` - Validated or unvalidated configuration.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the configuration is invalid or the image does not fit.
    pub fn from_config(
        program: Vec<Instruction>,
        image: &BTreeMap<u32, i32>,
        config: &Config,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let memory = MemoryBus::with_image(config.memory.size_bytes, image)?;
        let mut cache = Cache::new(CacheGeometry::from_config(config)?);
        cache.set_enabled(config.cache.enabled_at_start);
        let mut cpu = Self::new(program, memory, Some(cache));
        cpu.set_trace(config.general.trace_instructions);
        Ok(cpu)
    }
}
