//! Simulation statistics collection and reporting.
//!
//! This module tracks execution metrics for the simulator. It provides:
//! 1. **Retirement:** Total instructions retired.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump, system).
//! 3. **Control flow:** Taken and not-taken branch counts.
//! 4. **Cache:** Hits, misses, block write-backs, and flushes of the data cache.

use std::fmt::Write as _;

use serde::Serialize;

/// Counters maintained by the data cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses served by a valid line with a matching tag.
    pub hits: u64,
    /// Accesses that had to fill a line from memory.
    pub misses: u64,
    /// Dirty blocks written back to memory (eviction or flush).
    pub writebacks: u64,
    /// Flush operations performed.
    pub flushes: u64,
}

impl CacheStats {
    /// Returns the hit rate in percent, or `0.0` before the first access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Simulation statistics structure tracking all execution metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Number of instructions that completed.
    pub instructions_retired: u64,

    /// Count of ADD/ADDI/SUB/SUBI/SLT instructions retired.
    pub inst_alu: u64,
    /// Count of LW instructions retired.
    pub inst_load: u64,
    /// Count of SW instructions retired.
    pub inst_store: u64,
    /// Count of BNE instructions retired.
    pub inst_branch: u64,
    /// Count of J/JAL instructions retired.
    pub inst_jump: u64,
    /// Count of CACHE/NOP/HALT instructions retired.
    pub inst_system: u64,

    /// BNE instructions whose condition held.
    pub branches_taken: u64,
    /// BNE instructions that fell through.
    pub branches_not_taken: u64,

    /// Data cache counters (zero while the cache has never been enabled).
    pub cache: CacheStats,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"branch"`, `"memory"`.
/// Pass an empty slice to `render_sections` to render all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "branch", "memory"];

impl SimStats {
    /// Renders the requested statistics sections as text.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to render, or empty for all.
    pub fn render_sections(&self, sections: &[&str]) -> String {
        let want = |name: &str| sections.is_empty() || sections.contains(&name);
        let pct = |n: u64, d: u64| if d == 0 { 0.0 } else { (n as f64 / d as f64) * 100.0 };
        let instr = self.instructions_retired;
        let mut out = String::new();

        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let _ = writeln!(out, "SUMMARY");
            let _ = writeln!(out, "  instructions           {instr}");
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.jump", self.inst_jump),
                ("op.system", self.inst_system),
            ] {
                let _ = writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count, instr));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("branch") {
            let total = self.branches_taken + self.branches_not_taken;
            let _ = writeln!(out, "BRANCHES");
            let _ = writeln!(out, "  br.total               {total}");
            let _ = writeln!(out, "  br.taken               {}", self.branches_taken);
            let _ = writeln!(out, "  br.not_taken           {}", self.branches_not_taken);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("memory") {
            let c = &self.cache;
            let _ = writeln!(out, "DATA CACHE");
            let _ = writeln!(
                out,
                "  accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                c.hits + c.misses,
                c.hits,
                if c.hits + c.misses == 0 { 0.0 } else { 100.0 - c.hit_rate() }
            );
            let _ = writeln!(out, "  writebacks: {:<8} | flushes: {}", c.writebacks, c.flushes);
        }
        let _ = writeln!(out, "==========================================================");
        out
    }
}
