//! Pipeline Engine.
//!
//! This module drives one process through the five-stage pipeline for at most one quantum.
//! It performs:
//! 1. **Stage Dispatch:** Each cycle runs WB, MEM, EX, ID and IF, in that order, on the
//!    records admitted four, three, two, one and zero cycles earlier.
//! 2. **Drain:** Once the quantum expires, the end sentinel is fetched, or a blocking print
//!    issues, admission stops and a budget counts down the cycles needed to finish every
//!    record already in flight.
//! 3. **Flush:** A taken branch or jump retires the records older than itself, discards the
//!    younger ones and restarts the pipeline at the target.
//!
//! The engine never blocks. Requests produced by `PRINT` are returned to the caller along
//! with a summary of the quantum.

use tracing::{debug, trace};

use crate::common::constants::PIPELINE_DEPTH;
use crate::config::GeneralConfig;
use crate::core::arch::reg::Reg;
use crate::core::pipeline::record::InstructionRecord;
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};
use crate::isa::disasm::disassemble;
use crate::sim::audit::AuditLog;
use crate::sim::process::{Pcb, ProcessState};
use crate::soc::io::request::IoRequest;
use crate::soc::memory::MemoryHierarchy;

/// Engine switches taken from the general configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// `PRINT` blocks the issuing process.
    pub block_on_print: bool,
    /// Emit one trace event per stage per record.
    pub trace: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            block_on_print: true,
            trace: false,
        }
    }
}

impl From<&GeneralConfig> for EngineConfig {
    fn from(general: &GeneralConfig) -> Self {
        Self {
            block_on_print: general.block_on_print,
            trace: general.trace_instructions,
        }
    }
}

/// Record counts for one quantum.
///
/// After the pipeline has drained, `written_back + squashed == fetched`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantumTrace {
    /// Pipeline cycles run.
    pub cycles: u64,
    /// Records admitted by fetch.
    pub fetched: u64,
    /// Records that completed write-back, including taken branches.
    pub written_back: u64,
    /// Records discarded by a flush.
    pub squashed: u64,
    /// Taken branches and jumps.
    pub flushes: u64,
}

/// Result of one engine invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantumOutcome {
    /// Record counts.
    pub trace: QuantumTrace,
    /// I/O requests issued by `PRINT`, in program order.
    pub requests: Vec<IoRequest>,
}

/// Pipeline state for one quantum of one process.
///
/// Holds the process and memory by exclusive borrow for the duration of the quantum.
#[derive(Debug)]
pub struct Core<'a> {
    pub(crate) pcb: &'a mut Pcb,
    pub(crate) memory: &'a mut MemoryHierarchy,
    pub(crate) audit: &'a AuditLog,
    pub(crate) config: EngineConfig,
    pub(crate) records: Vec<InstructionRecord>,
    pub(crate) requests: Vec<IoRequest>,
    pub(crate) trace: QuantumTrace,
    /// Cycles since the pipeline was last (re)started; indexes `records`.
    cursor: usize,
    /// Cycles since the quantum started; never reset by a flush.
    elapsed: u64,
    drain_budget: u32,
    pub(crate) program_ended: bool,
    pub(crate) stop_admitting: bool,
    pub(crate) io_blocked: bool,
}

/// Runs `pcb` for one quantum.
///
/// # Arguments
///
/// * `pcb` - The process to run; its state is updated on return.
/// * `memory` - The shared memory hierarchy.
/// * `config` - Print blocking and trace switches.
/// * `audit` - Sink for instruction trace lines.
///
/// # Returns
///
/// The record counts and any I/O requests issued.
pub fn run_quantum(
    pcb: &mut Pcb,
    memory: &mut MemoryHierarchy,
    config: EngineConfig,
    audit: &AuditLog,
) -> QuantumOutcome {
    Core::new(pcb, memory, config, audit).run()
}

impl<'a> Core<'a> {
    /// Prepares a pipeline for one quantum.
    pub fn new(
        pcb: &'a mut Pcb,
        memory: &'a mut MemoryHierarchy,
        config: EngineConfig,
        audit: &'a AuditLog,
    ) -> Self {
        Self {
            pcb,
            memory,
            audit,
            config,
            records: Vec::new(),
            requests: Vec::new(),
            trace: QuantumTrace::default(),
            cursor: 0,
            elapsed: 0,
            drain_budget: PIPELINE_DEPTH,
            program_ended: false,
            stop_admitting: false,
            io_blocked: false,
        }
    }

    /// Runs cycles until the drain budget is exhausted.
    ///
    /// # Returns
    ///
    /// The record counts and any I/O requests issued.
    pub fn run(mut self) -> QuantumOutcome {
        debug!(pid = %self.pcb.pid, pc = self.pcb.pc(), quantum = self.pcb.quantum, "quantum start");
        while self.drain_budget > 0 {
            self.cycle();
        }

        self.pcb.state = if self.program_ended {
            ProcessState::Finished
        } else if self.io_blocked {
            ProcessState::Blocked
        } else {
            ProcessState::Ready
        };

        debug!(
            pid = %self.pcb.pid,
            state = %self.pcb.state,
            cycles = self.trace.cycles,
            retired = self.trace.written_back,
            "quantum end"
        );
        QuantumOutcome {
            trace: self.trace,
            requests: self.requests,
        }
    }

    /// Index of the record admitted `age` cycles ago, if there is one.
    fn admitted(&self, age: usize) -> Option<usize> {
        self.cursor
            .checked_sub(age)
            .filter(|idx| *idx < self.records.len())
    }

    /// Runs one pipeline cycle.
    fn cycle(&mut self) {
        if self.drain_budget >= 1 {
            if let Some(idx) = self.admitted(4) {
                wb_stage(self, idx);
            }
        }
        if self.drain_budget >= 2 {
            if let Some(idx) = self.admitted(3) {
                mem_stage(self, idx);
            }
        }
        if self.drain_budget >= 3 {
            if let Some(idx) = self.admitted(2) {
                execute_stage(self, idx);
            }
        }
        if self.drain_budget >= 4 {
            if let Some(idx) = self.admitted(1) {
                decode_stage(self, idx);
            }
        }
        if self.drain_budget == PIPELINE_DEPTH && !self.stop_admitting {
            fetch_stage(self);
        }

        self.cursor += 1;
        self.elapsed += 1;
        self.pcb.stats.pipeline_cycles += 1;
        self.trace.cycles += 1;

        if self.elapsed >= self.pcb.quantum || self.program_ended {
            self.stop_admitting = true;
        }
        if self.stop_admitting {
            self.drain_budget -= 1;
        }
    }

    /// Redirects the pipeline after the record at `branch` was taken.
    ///
    /// The record one older than the branch has already passed MEM this cycle and is written
    /// back now; the branch itself retires; every younger record is discarded.
    pub(crate) fn flush(&mut self, branch: usize, target: u32) {
        self.pcb.regs.write(Reg::Pc, target);

        if let Some(older) = branch.checked_sub(1) {
            wb_stage(self, older);
        }
        self.retire();

        let squashed = (self.records.len() - branch - 1) as u64;
        self.trace.squashed += squashed;
        self.trace.flushes += 1;
        self.pcb.stats.instructions_squashed += squashed;
        self.pcb.stats.flushes += 1;

        self.records.clear();
        self.cursor = 0;
        self.program_ended = false;
        self.stop_admitting = self.elapsed >= self.pcb.quantum || self.io_blocked;
        // Nothing is left in flight, so a stopped pipeline only needs to finish this cycle.
        self.drain_budget = if self.stop_admitting { 1 } else { PIPELINE_DEPTH };
        debug!(pid = %self.pcb.pid, target, squashed, "pipeline flush");
    }

    /// Counts one record as retired.
    pub(crate) fn retire(&mut self) {
        self.trace.written_back += 1;
        self.pcb.stats.instructions_retired += 1;
    }

    /// Counts one stage execution on a valid record and emits its trace event.
    pub(crate) fn note(&mut self, idx: usize, stage: &str) {
        self.pcb.stats.stage_invocations += 1;
        if !self.config.trace {
            return;
        }
        let record = self.records[idx];
        let text = disassemble(record.raw);
        trace!(pid = %self.pcb.pid, stage, pc = record.pc, "{text}");
        self.audit
            .record(format!("[{}] {stage} pc={} {text}", self.pcb.pid, record.pc));
    }

    /// Queues a print request and, if prints block, stops admission.
    pub(crate) fn issue(&mut self, request: IoRequest) {
        self.pcb.stats.io_requests += 1;
        self.requests.push(request);
        if self.config.block_on_print {
            self.pcb.state = ProcessState::Blocked;
            self.io_blocked = true;
            self.stop_admitting = true;
        }
    }
}
