//! Simulator: a configured CPU plus its run policy.
//!
//! Bundles the instruction ceiling from [`Config`] with the core so callers (the CLI,
//! integration tests) can go from parsed inputs to a [`SimReport`] in three calls.

use std::collections::BTreeMap;

use tracing::info;

use crate::common::Fault;
use crate::config::Config;
use crate::core::{Cpu, SetupError};
use crate::isa::Instruction;
use crate::sim::report::SimReport;

/// Top-level simulator: CPU state plus the configured instruction ceiling.
#[derive(Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, memory, cache, stats).
    pub cpu: Cpu,
    max_instructions: Option<u64>,
}

impl Simulator {
    /// Creates a simulator from a program, an initial memory image, and configuration.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the configuration is invalid or the image does not fit.
    pub fn new(
        program: Vec<Instruction>,
        image: &BTreeMap<u32, i32>,
        config: &Config,
    ) -> Result<Self, SetupError> {
        let cpu = Cpu::from_config(program, image, config)?;
        info!(
            instructions = cpu.program().len(),
            words = image.len(),
            "simulator initialised"
        );
        Ok(Self {
            cpu,
            max_instructions: config.general.max_instructions,
        })
    }

    /// Runs to completion, honouring the configured instruction ceiling.
    ///
    /// # Errors
    ///
    /// Returns the [`Fault`] that stopped the run.
    pub fn run(&mut self) -> Result<(), Fault> {
        match self.max_instructions {
            Some(limit) => self.cpu.run_with_limit(limit),
            None => self.cpu.run(),
        }
    }

    /// Captures the current state.
    pub fn report(&self) -> SimReport {
        SimReport::capture(&self.cpu)
    }
}
