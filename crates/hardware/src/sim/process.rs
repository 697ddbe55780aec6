//! Process Control Block.
//!
//! This module defines the simulated process. It provides:
//! 1. **Identity:** `Pid`, name, quantum and priority.
//! 2. **Lifecycle:** `ProcessState` transitions driven by the scheduler, engine and I/O manager.
//! 3. **Ownership:** The register file, memory-tier weights and statistics, owned by value so
//!    that exactly one component can hold a process at a time.

use std::fmt;

use serde::Deserialize;

use crate::common::reg::RegisterFile;
use crate::core::arch::reg::Reg;
use crate::stats::ProcessStats;

/// Process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessState {
    /// Waiting in the ready queue.
    #[default]
    Ready,
    /// Executing on the pipeline.
    Running,
    /// Waiting for an I/O request to be serviced.
    Blocked,
    /// Reached the end sentinel.
    Finished,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Blocked => "Blocked",
            Self::Finished => "Finished",
        })
    }
}

/// Cycle weight charged per access at each memory tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemWeights {
    /// Cycles per cache access.
    pub cache: u64,
    /// Cycles per primary-store access.
    pub primary: u64,
    /// Cycles per secondary-store access.
    pub secondary: u64,
}

impl Default for MemWeights {
    fn default() -> Self {
        Self {
            cache: 1,
            primary: 5,
            secondary: 10,
        }
    }
}

/// Process control block: identity, scheduling attributes, state, and owned resources.
#[derive(Debug, Clone)]
pub struct Pcb {
    /// Process identifier.
    pub pid: Pid,
    /// Human-readable name.
    pub name: String,
    /// Pipeline cycles granted per dispatch.
    pub quantum: u64,
    /// Informational priority; dispatch order is round robin.
    pub priority: i32,
    /// Current lifecycle state.
    pub state: ProcessState,
    /// Architectural registers.
    pub regs: RegisterFile,
    /// Memory-tier cost weights.
    pub weights: MemWeights,
    /// Instrumentation counters.
    pub stats: ProcessStats,
}

impl Pcb {
    /// Creates a ready process whose program counter points at `entry`.
    ///
    /// A quantum of `0` is raised to `1`.
    pub fn new(pid: Pid, name: impl Into<String>, quantum: u64, entry: u32) -> Self {
        let mut regs = RegisterFile::new();
        regs.write(Reg::Pc, entry);
        Self {
            pid,
            name: name.into(),
            quantum: quantum.max(1),
            priority: 0,
            state: ProcessState::Ready,
            regs,
            weights: MemWeights::default(),
            stats: ProcessStats::default(),
        }
    }

    /// Sets the memory weights.
    #[must_use]
    pub fn with_weights(mut self, weights: MemWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Current program counter.
    pub const fn pc(&self) -> u32 {
        self.regs.read(Reg::Pc)
    }

    /// Heading used for metric reports.
    pub fn title(&self) -> String {
        format!("PROCESS {} ({})", self.pid, self.name)
    }
}
