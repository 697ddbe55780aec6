//! Round-Robin Scheduler.
//!
//! This module binds the pipeline engine to the I/O subsystem. It provides:
//! 1. **Admission:** Ready processes enter a FIFO queue; pids must be unique.
//! 2. **Dispatch:** The head of the queue runs for one quantum on the pipeline engine.
//! 3. **Routing:** A blocked process is moved into the I/O subsystem, a finished process is
//!    retired, and anything else goes back to the tail of the queue.
//! 4. **Release:** Processes the I/O manager has serviced come back over the completion
//!    channel and rejoin the queue.
//!
//! Every process is owned by exactly one place at a time: the ready queue, the engine call,
//! the I/O subsystem, or the finished list. The blocked list only records pids.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::debug;

use crate::common::error::SimError;
use crate::core::pipeline::engine::{EngineConfig, run_quantum};
use crate::sim::audit::AuditLog;
use crate::sim::process::{Pcb, Pid, ProcessState};
use crate::soc::io::IoSubsystem;
use crate::soc::memory::MemoryHierarchy;

/// What one call to [`Scheduler::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A process ran for one quantum and ended in the given state.
    Dispatched(Pid, ProcessState),
    /// Every remaining process is blocked, or detached requests are still being serviced;
    /// the scheduler waited for a completion.
    Waiting,
    /// No process remains.
    Done,
}

/// Ready queue, blocked list and the components they feed.
#[derive(Debug)]
pub struct Scheduler {
    ready: VecDeque<Pcb>,
    blocked: Vec<Pid>,
    finished: Vec<Pcb>,
    memory: MemoryHierarchy,
    io: IoSubsystem,
    engine: EngineConfig,
    poll: Duration,
    audit: AuditLog,
}

impl Scheduler {
    /// Creates a scheduler over an existing memory hierarchy and I/O subsystem.
    ///
    /// # Arguments
    ///
    /// * `memory` - Memory shared by every process.
    /// * `io` - Running I/O subsystem.
    /// * `engine` - Pipeline switches.
    /// * `poll` - Wait per step when only blocked processes remain.
    /// * `audit` - Sink for instruction trace lines.
    pub fn new(
        memory: MemoryHierarchy,
        io: IoSubsystem,
        engine: EngineConfig,
        poll: Duration,
        audit: AuditLog,
    ) -> Self {
        Self {
            ready: VecDeque::new(),
            blocked: Vec::new(),
            finished: Vec::new(),
            memory,
            io,
            engine,
            poll,
            audit,
        }
    }

    /// Adds a process to the tail of the ready queue.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicatePid`] if a process with the same pid is already known.
    pub fn admit(&mut self, mut pcb: Pcb) -> Result<(), SimError> {
        if self.contains(pcb.pid) {
            return Err(SimError::DuplicatePid(pcb.pid.0));
        }
        debug!(pid = %pcb.pid, name = %pcb.name, quantum = pcb.quantum, "process admitted");
        pcb.state = ProcessState::Ready;
        self.ready.push_back(pcb);
        Ok(())
    }

    /// Returns `true` if a process with `pid` has been admitted.
    ///
    /// A process that is currently inside the I/O subsystem is found through the blocked list.
    pub fn contains(&self, pid: Pid) -> bool {
        self.ready.iter().any(|p| p.pid == pid)
            || self.blocked.contains(&pid)
            || self.finished.iter().any(|p| p.pid == pid)
    }

    /// Pids in the ready queue, head first.
    pub fn ready_pids(&self) -> Vec<Pid> {
        self.ready.iter().map(|p| p.pid).collect()
    }

    /// Pids currently waiting for I/O.
    pub fn blocked_pids(&self) -> &[Pid] {
        &self.blocked
    }

    /// Processes retired so far, in retirement order.
    pub fn finished(&self) -> &[Pcb] {
        &self.finished
    }

    /// The shared memory hierarchy.
    pub const fn memory(&self) -> &MemoryHierarchy {
        &self.memory
    }

    /// Mutable access to the memory hierarchy, for loading images.
    pub fn memory_mut(&mut self) -> &mut MemoryHierarchy {
        &mut self.memory
    }

    /// Moves a serviced process from the blocked list back to the ready queue.
    fn release(&mut self, pcb: Pcb) {
        debug!(pid = %pcb.pid, io_ms = pcb.stats.io_cycles, "process released from I/O");
        self.blocked.retain(|pid| *pid != pcb.pid);
        self.ready.push_back(pcb);
    }

    /// Performs one scheduling decision.
    ///
    /// # Returns
    ///
    /// What happened: a dispatch, a wait on blocked processes, or completion.
    pub fn step(&mut self) -> Step {
        for pcb in self.io.try_completed() {
            self.release(pcb);
        }

        let Some(mut pcb) = self.ready.pop_front() else {
            if self.blocked.is_empty() && self.io.is_idle() {
                return Step::Done;
            }
            if let Some(pcb) = self.io.wait_completed(self.poll) {
                self.release(pcb);
            }
            return Step::Waiting;
        };

        pcb.state = ProcessState::Running;
        pcb.stats.quanta += 1;
        debug!(pid = %pcb.pid, pc = pcb.pc(), "dispatch");
        let outcome = run_quantum(&mut pcb, &mut self.memory, self.engine, &self.audit);

        let pid = pcb.pid;
        let state = pcb.state;
        match state {
            ProcessState::Blocked => {
                debug!(%pid, requests = outcome.requests.len(), "blocked on I/O");
                self.blocked.push(pid);
                self.io.register_process_waiting_for_io(pcb, outcome.requests);
            }
            ProcessState::Finished => {
                for request in outcome.requests {
                    self.io.submit(request);
                }
                debug!(%pid, cycles = pcb.stats.pipeline_cycles, "finished");
                self.finished.push(pcb);
            }
            ProcessState::Ready | ProcessState::Running => {
                for request in outcome.requests {
                    self.io.submit(request);
                }
                pcb.state = ProcessState::Ready;
                debug!(%pid, pc = pcb.pc(), "preempted");
                self.ready.push_back(pcb);
            }
        }
        Step::Dispatched(pid, state)
    }

    /// Steps until every process has finished.
    ///
    /// # Returns
    ///
    /// The finished processes in retirement order.
    pub fn run(mut self) -> Vec<Pcb> {
        while self.step() != Step::Done {}
        let flushed = self.memory.flush();
        debug!(lines = flushed, "cache flushed");
        self.finished
    }
}
