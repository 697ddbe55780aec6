//! Per-process statistics collection and reporting.
//!
//! This module tracks the instrumentation counters every process carries. It provides:
//! 1. **Pipeline:** Cycles, stage invocations, and fetched/retired/squashed records.
//! 2. **Memory:** Reads, writes, cache hits and misses, per-tier accesses and weighted cycles.
//! 3. **I/O:** Completed requests and accumulated simulated I/O time.
//!
//! Every counter is monotonically increasing over the life of the process.

use std::fmt::Write as _;

/// Section names for selective stats output.
///
/// Pass an empty slice to [`ProcessStats::render_sections`] to render all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "memory", "io"];

/// Horizontal rule used between report sections.
const RULE: &str = "----------------------------------------------------------";

/// Border used at the top and bottom of a report.
const BAR: &str = "==========================================================";

/// Instrumentation counters of one process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Pipeline cycles executed across all quanta.
    pub pipeline_cycles: u64,
    /// Stage executions on a valid instruction record.
    pub stage_invocations: u64,
    /// Instruction records admitted by fetch.
    pub instructions_fetched: u64,
    /// Records that completed write-back.
    pub instructions_retired: u64,
    /// Records discarded by a pipeline flush.
    pub instructions_squashed: u64,
    /// Taken branches and jumps.
    pub flushes: u64,
    /// Engine invocations (quanta) granted by the scheduler.
    pub quanta: u64,

    /// Read operations issued to the memory hierarchy.
    pub mem_reads: u64,
    /// Write operations issued to the memory hierarchy.
    pub mem_writes: u64,
    /// Accesses that hit in the cache.
    pub cache_hits: u64,
    /// Accesses that missed in the cache.
    pub cache_misses: u64,
    /// Cycles charged at the cache tier.
    pub cache_accesses: u64,
    /// Accesses that reached primary store.
    pub primary_accesses: u64,
    /// Accesses that reached secondary store.
    pub secondary_accesses: u64,
    /// Weighted memory cycles (each access charged at its tier's weight).
    pub memory_cycles: u64,
    /// Accesses at any tier.
    pub mem_accesses_total: u64,

    /// I/O requests issued by the process.
    pub io_requests: u64,
    /// Simulated I/O time in milliseconds accumulated while blocked.
    pub io_cycles: u64,
}

impl ProcessStats {
    /// Cache hit rate in percent, or `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            (self.cache_hits as f64 / total as f64) * 100.0
        }
    }

    /// Renders only the requested statistics sections.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"pipeline"`, `"memory"`,
    /// or `"io"`. Pass an empty slice to render all sections.
    ///
    /// # Arguments
    ///
    /// * `title` - Heading line, usually the process name and id.
    /// * `sections` - Slice of section names to render, or empty for all.
    pub fn render_sections(&self, title: &str, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();
        let cyc = self.pipeline_cycles.max(1);

        let _ = writeln!(out, "{BAR}");
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "{BAR}");
        if want("summary") {
            let ipc = self.instructions_retired as f64 / cyc as f64;
            let _ = writeln!(out, "pipeline_cycles          {}", self.pipeline_cycles);
            let _ = writeln!(out, "instructions_retired     {}", self.instructions_retired);
            let _ = writeln!(out, "ipc                      {ipc:.4}");
            let _ = writeln!(out, "quanta                   {}", self.quanta);
            let _ = writeln!(out, "{RULE}");
        }
        if want("pipeline") {
            let _ = writeln!(out, "PIPELINE");
            let _ = writeln!(out, "  stage_invocations      {}", self.stage_invocations);
            let _ = writeln!(out, "  fetched                {}", self.instructions_fetched);
            let _ = writeln!(out, "  retired                {}", self.instructions_retired);
            let _ = writeln!(out, "  squashed               {}", self.instructions_squashed);
            let _ = writeln!(out, "  flushes                {}", self.flushes);
            let _ = writeln!(out, "{RULE}");
        }
        if want("memory") {
            let _ = writeln!(out, "MEMORY HIERARCHY");
            let _ = writeln!(out, "  mem_reads              {}", self.mem_reads);
            let _ = writeln!(out, "  mem_writes             {}", self.mem_writes);
            let _ = writeln!(
                out,
                "  cache                  hits: {:<8} | misses: {:<8} | hit_rate: {:.2}%",
                self.cache_hits,
                self.cache_misses,
                self.hit_rate()
            );
            let _ = writeln!(out, "  cache_accesses         {}", self.cache_accesses);
            let _ = writeln!(out, "  primary_accesses       {}", self.primary_accesses);
            let _ = writeln!(out, "  secondary_accesses     {}", self.secondary_accesses);
            let _ = writeln!(out, "  mem_accesses_total     {}", self.mem_accesses_total);
            let _ = writeln!(out, "  memory_cycles          {}", self.memory_cycles);
            let _ = writeln!(out, "{RULE}");
        }
        if want("io") {
            let _ = writeln!(out, "I/O");
            let _ = writeln!(out, "  io_requests            {}", self.io_requests);
            let _ = writeln!(out, "  io_cycles              {} ms", self.io_cycles);
        }
        let _ = writeln!(out, "{BAR}");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, title: &str, sections: &[String]) {
        print!("{}", self.render_sections(title, sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(title, &[])`.
    pub fn print(&self, title: &str) {
        self.print_sections(title, &[]);
    }
}
