//! Concurrent I/O Subsystem.
//!
//! This module models blocking device I/O with two background threads. It provides:
//! 1. **Device Arrival:** On a fixed tick, each device is independently and probabilistically
//!    flagged as requesting service.
//! 2. **Matching:** The I/O manager pairs the oldest waiting process with the highest-priority
//!    requesting device, clears the flag and queues a job with a randomized cost.
//! 3. **Service:** The manager pops the oldest job, sleeps for its cost, writes the audit
//!    record, charges the owner's I/O time, marks it ready and hands it back to the
//!    scheduler over a completion channel.
//!
//! A blocked process is moved into this subsystem by value and moved back out on completion,
//! so it is never reachable from two components at once. The waiting list, device flags and
//! request queue each have their own lock, always taken in that order, and no lock is held
//! across the latency sleep.

/// Devices and their request flags.
pub mod device;

/// Requests, operations and queued jobs.
pub mod request;

/// Xorshift generator for arrivals and costs.
pub mod rng;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, trace};

use self::device::{Device, DeviceFlags};
use self::request::{IoJob, IoOperation, IoRequest};
use self::rng::XorShift;
use crate::common::sync::lock;
use crate::config::IoConfig;
use crate::sim::audit::AuditLog;
use crate::sim::process::{Pcb, ProcessState};

/// A blocked process and the requests it issued before blocking.
#[derive(Debug)]
struct WaitingProcess {
    pcb: Pcb,
    pending: Vec<IoRequest>,
}

/// State shared by the caller and both worker threads.
#[derive(Debug)]
struct Shared {
    config: IoConfig,
    waiting: Mutex<VecDeque<WaitingProcess>>,
    devices: Mutex<DeviceFlags>,
    requests: Mutex<VecDeque<IoJob>>,
    rng: Mutex<XorShift>,
    shutdown: AtomicBool,
    /// Waiting processes plus queued or in-service jobs.
    outstanding: AtomicUsize,
    audit: AuditLog,
    done: Sender<Pcb>,
}

/// Handle to the running I/O subsystem. Dropping it stops and joins the worker threads.
#[derive(Debug)]
pub struct IoSubsystem {
    shared: Arc<Shared>,
    completed: Receiver<Pcb>,
    workers: Vec<JoinHandle<()>>,
}

impl IoSubsystem {
    /// Starts the device-arrival and I/O manager threads.
    ///
    /// # Arguments
    ///
    /// * `config` - Device odds, costs and loop periods.
    /// * `audit` - Sink for one line per completed request.
    ///
    /// # Errors
    ///
    /// Returns the OS error if a worker thread cannot be spawned.
    pub fn start(config: IoConfig, audit: AuditLog) -> std::io::Result<Self> {
        let (done, completed) = mpsc::channel();
        let shared = Arc::new(Shared {
            rng: Mutex::new(XorShift::new(config.seed)),
            config,
            waiting: Mutex::new(VecDeque::new()),
            devices: Mutex::new(DeviceFlags::default()),
            requests: Mutex::new(VecDeque::new()),
            shutdown: AtomicBool::new(false),
            outstanding: AtomicUsize::new(0),
            audit,
            done,
        });

        let mut subsystem = Self {
            shared: Arc::clone(&shared),
            completed,
            workers: Vec::with_capacity(2),
        };

        let arrivals = Arc::clone(&shared);
        subsystem.workers.push(
            thread::Builder::new()
                .name("io-devices".into())
                .spawn(move || arrivals.arrival_loop())?,
        );
        let manager = shared;
        subsystem.workers.push(
            thread::Builder::new()
                .name("io-manager".into())
                .spawn(move || manager.manager_loop())?,
        );
        Ok(subsystem)
    }

    /// Hands a blocked process to the subsystem.
    ///
    /// The caller must already have set the process state to `Blocked`. The process is
    /// returned through [`Self::try_completed`] or [`Self::wait_completed`] once a device
    /// has serviced it, in state `Ready`.
    ///
    /// # Arguments
    ///
    /// * `pcb` - The blocked process, moved in.
    /// * `pending` - Requests the process issued during its last quantum.
    pub fn register_process_waiting_for_io(&self, pcb: Pcb, pending: Vec<IoRequest>) {
        debug!(pid = %pcb.pid, pending = pending.len(), "process waiting for I/O");
        let _ = self.shared.outstanding.fetch_add(1, Ordering::AcqRel);
        lock(&self.shared.waiting).push_back(WaitingProcess { pcb, pending });
    }

    /// Queues a request whose issuer did not block.
    pub fn submit(&self, request: IoRequest) {
        let job = IoJob {
            request,
            device: None,
            cost: self.shared.draw_cost(),
            owner: None,
        };
        let _ = self.shared.outstanding.fetch_add(1, Ordering::AcqRel);
        lock(&self.shared.requests).push_back(job);
    }

    /// Flags a device as requesting, as the arrival loop would.
    pub fn raise(&self, device: Device) {
        let _ = lock(&self.shared.devices).raise(device);
    }

    /// Collects every process released since the last call, without waiting.
    pub fn try_completed(&self) -> Vec<Pcb> {
        self.completed.try_iter().collect()
    }

    /// Waits up to `timeout` for the next released process.
    pub fn wait_completed(&self, timeout: Duration) -> Option<Pcb> {
        self.completed.recv_timeout(timeout).ok()
    }

    /// Returns `true` when no process is waiting and no job is queued or in service.
    pub fn is_idle(&self) -> bool {
        self.shared.outstanding.load(Ordering::Acquire) == 0
    }

    /// Number of processes waiting for a device.
    pub fn waiting_len(&self) -> usize {
        lock(&self.shared.waiting).len()
    }

    /// Number of jobs queued for service.
    pub fn queued_len(&self) -> usize {
        lock(&self.shared.requests).len()
    }

    /// Stops both workers and waits for them to exit. Idempotent.
    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                tracing::error!("I/O worker panicked");
            }
        }
    }
}

impl Drop for IoSubsystem {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Shared {
    fn stopping(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    fn draw_cost(&self) -> Duration {
        let units = lock(&self.rng).between_one_and(self.config.cost_max_units);
        Duration::from_millis(u64::from(units) * self.config.cost_unit_ms)
    }

    /// Raises device flags at random on a fixed tick.
    fn arrival_loop(&self) {
        let tick = Duration::from_millis(self.config.device_tick_ms.max(1));
        while !self.stopping() {
            thread::sleep(tick);
            let (printer, disk) = {
                let mut rng = lock(&self.rng);
                (
                    rng.one_in(self.config.printer_one_in),
                    rng.one_in(self.config.disk_one_in),
                )
            };
            let mut flags = lock(&self.devices);
            if printer && flags.raise(Device::Printer) {
                trace!("printer requesting");
            }
            if disk && flags.raise(Device::Disk) {
                trace!("disk requesting");
            }
        }
    }

    /// Matches waiting processes to devices and services queued jobs.
    fn manager_loop(&self) {
        let idle = Duration::from_millis(self.config.idle_ms);
        while !self.stopping() {
            if let Some(job) = self.match_waiting() {
                lock(&self.requests).push_back(job);
            }
            let next = lock(&self.requests).pop_front();
            match next {
                Some(job) => self.service(job),
                None => thread::sleep(idle),
            }
        }
    }

    /// Pairs the oldest waiting process with the highest-priority requesting device.
    fn match_waiting(&self) -> Option<IoJob> {
        let mut waiting = lock(&self.waiting);
        if waiting.is_empty() {
            return None;
        }
        let device = lock(&self.devices).take()?;
        let WaitingProcess { pcb, pending } = waiting.pop_front()?;
        drop(waiting);

        let request = if pending.is_empty() {
            IoRequest {
                pid: pcb.pid,
                operation: device.operation(),
                message: device.default_message().to_owned(),
            }
        } else {
            IoRequest {
                pid: pcb.pid,
                operation: IoOperation::Print,
                message: pending
                    .into_iter()
                    .map(|r| r.message)
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        };
        debug!(pid = %pcb.pid, ?device, "device assigned");
        Some(IoJob {
            request,
            device: Some(device),
            cost: self.draw_cost(),
            owner: Some(pcb),
        })
    }

    /// Sleeps for the job's cost, audits it, and releases its owner.
    fn service(&self, job: IoJob) {
        if !job.cost.is_zero() {
            thread::sleep(job.cost);
        }
        let cost_ms = u64::try_from(job.cost.as_millis()).unwrap_or(u64::MAX);
        let IoRequest {
            pid,
            operation,
            message,
        } = job.request;

        self.audit.io_completed(pid, operation, &message);
        info!(%pid, %operation, cost_ms, "I/O request serviced");

        if let Some(mut pcb) = job.owner {
            pcb.stats.io_cycles += cost_ms;
            pcb.state = ProcessState::Ready;
            let _ = self.done.send(pcb);
        }
        let _ = self.outstanding.fetch_sub(1, Ordering::AcqRel);
    }
}
