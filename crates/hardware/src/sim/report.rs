//! End-of-run report.
//!
//! A [`SimReport`] is a self-contained snapshot of a finished (or faulted) run: the
//! architectural state, the coherent contents of memory, statistics, and the fault if
//! there was one. It serializes to JSON for tooling and renders as text for humans.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::common::Fault;
use crate::core::Cpu;
use crate::soc::MemoryBus;
use crate::stats::SimStats;

/// Snapshot of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimReport {
    /// Whether the core stopped (HALT, fall-off, or fault).
    pub halted: bool,
    /// Final program counter.
    pub pc: u32,
    /// Register values `R0..R31`.
    pub registers: Vec<i32>,
    /// Non-zero memory words keyed by byte address, including unflushed cached data.
    pub memory: BTreeMap<u32, i32>,
    /// Execution and cache counters.
    pub stats: SimStats,
    /// The error that ended the run, if any.
    pub fault: Option<Fault>,
}

impl SimReport {
    /// Captures the current state of `cpu`.
    pub fn capture(cpu: &Cpu<MemoryBus>) -> Self {
        Self {
            halted: cpu.halted(),
            pc: cpu.pc(),
            registers: cpu.registers().to_vec(),
            memory: cpu.memory_snapshot(),
            stats: cpu.stats(),
            fault: cpu.fault().cloned(),
        }
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the report as human-readable text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let status = match (&self.fault, self.halted) {
            (Some(_), _) => "FAULT",
            (None, true) => "HALTED",
            (None, false) => "RUNNING",
        };
        let _ = writeln!(out, "status: {status}  pc: {:#x}", self.pc);
        if let Some(fault) = &self.fault {
            let _ = writeln!(out, "fault:  {fault}");
        }
        let _ = writeln!(out, "registers:");
        for (row, chunk) in self.registers.chunks(4).enumerate() {
            let line: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(i, v)| format!("R{:<2}={:>11}", row * 4 + i, v))
                .collect();
            let _ = writeln!(out, "  {}", line.join("  "));
        }
        let _ = writeln!(out, "memory ({} non-zero words):", self.memory.len());
        for (addr, value) in &self.memory {
            let _ = writeln!(out, "  {addr:#010x}: {value}");
        }
        out.push_str(&self.stats.render_sections(&[]));
        out
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}
