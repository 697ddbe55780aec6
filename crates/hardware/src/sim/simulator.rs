//! Simulator: memory, I/O and scheduler wired together from one configuration.
//!
//! Images are placed back to back in memory in admission order unless a descriptor names
//! its own origin.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info};

use crate::common::error::{LoadError, SimError};
use crate::config::Config;
use crate::core::arch::reg::Reg;
use crate::core::pipeline::engine::EngineConfig;
use crate::sim::audit::AuditLog;
use crate::sim::loader::{load_descriptor, place_process};
use crate::sim::process::{Pcb, Pid};
use crate::sim::scheduler::Scheduler;
use crate::soc::io::IoSubsystem;
use crate::soc::memory::MemoryHierarchy;

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    scheduler: Scheduler,
    next_origin: u32,
    audit: AuditLog,
}

impl Simulator {
    /// Builds the memory hierarchy, starts the I/O threads and creates the scheduler.
    ///
    /// # Errors
    ///
    /// Returns the OS error if an I/O thread cannot be spawned.
    pub fn new(config: &Config, audit: AuditLog) -> std::io::Result<Self> {
        let memory = MemoryHierarchy::new(&config.memory);
        let io = IoSubsystem::start(config.io.clone(), audit.clone())?;
        let scheduler = Scheduler::new(
            memory,
            io,
            EngineConfig::from(&config.general),
            Duration::from_millis(config.scheduler.poll_ms),
            audit.clone(),
        );
        Ok(Self {
            scheduler,
            next_origin: 0,
            audit,
        })
    }

    /// Address the next image without an explicit origin will be placed at.
    pub const fn next_origin(&self) -> u32 {
        self.next_origin
    }

    /// The scheduler, for inspection.
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Loads and admits the process a descriptor file describes.
    ///
    /// # Errors
    ///
    /// Returns the load error, or [`LoadError::Admission`] for a duplicate pid. A failed
    /// admission leaves memory and the other processes untouched.
    pub fn admit_descriptor(&mut self, path: &Path) -> Result<Pid, LoadError> {
        let desc = load_descriptor(path)?;
        if self.scheduler.contains(desc.pid) {
            return Err(SimError::DuplicatePid(desc.pid.0).into());
        }
        let loaded = place_process(desc, self.scheduler.memory_mut(), self.next_origin)?;
        self.next_origin = self.next_origin.max(loaded.end());
        let pid = loaded.pcb.pid;
        self.scheduler.admit(loaded.pcb)?;
        info!(%pid, origin = loaded.origin, words = loaded.len, "process admitted");
        Ok(pid)
    }

    /// Places an already assembled image at the next free address and admits `pcb` with its
    /// program counter pointing at it.
    ///
    /// # Returns
    ///
    /// The load origin.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ProgramTooLarge`] if the image does not fit, or
    /// [`LoadError::Admission`] for a duplicate pid.
    pub fn admit_image(&mut self, mut pcb: Pcb, words: &[u32]) -> Result<u32, LoadError> {
        if self.scheduler.contains(pcb.pid) {
            return Err(SimError::DuplicatePid(pcb.pid.0).into());
        }
        let origin = self.next_origin;
        self.scheduler.memory_mut().load_image(origin, words)?;
        let len = u32::try_from(words.len()).unwrap_or(u32::MAX);
        self.next_origin = origin.saturating_add(len);
        pcb.regs.write(Reg::Pc, origin);
        self.scheduler.admit(pcb)?;
        Ok(origin)
    }

    /// Runs every admitted process to completion.
    ///
    /// # Returns
    ///
    /// The finished processes in retirement order.
    pub fn run(self) -> Vec<Pcb> {
        let finished = self.scheduler.run();
        if let Err(e) = self.audit.flush() {
            error!(error = %e, "audit log flush failed");
        }
        finished
    }
}
