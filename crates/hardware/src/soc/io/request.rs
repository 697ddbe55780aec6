//! I/O requests and queued jobs.

use std::fmt;
use std::time::Duration;

use crate::sim::process::{Pcb, Pid};
use crate::soc::io::device::Device;

/// Operation tag carried by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoOperation {
    /// Output produced by a `PRINT` instruction.
    Print,
    /// A printer job raised by the device.
    PrintJob,
    /// A disk read raised by the device.
    ReadFromDisk,
}

impl IoOperation {
    /// Tag written to the audit log.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::PrintJob => "print_job",
            Self::ReadFromDisk => "read_from_disk",
        }
    }
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request produced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoRequest {
    /// Issuing process.
    pub pid: Pid,
    /// Operation tag.
    pub operation: IoOperation,
    /// Human-readable payload.
    pub message: String,
}

impl IoRequest {
    /// A `PRINT` request carrying `value`.
    pub fn print(pid: Pid, value: i32) -> Self {
        Self {
            pid,
            operation: IoOperation::Print,
            message: value.to_string(),
        }
    }
}

/// A request queued for the I/O manager, with its simulated cost.
///
/// `owner` holds the blocked process for the duration of the job; it is `None` for
/// requests whose issuer did not block.
#[derive(Debug)]
pub struct IoJob {
    /// The request being serviced.
    pub request: IoRequest,
    /// Device assigned to the job, if it was matched to one.
    pub device: Option<Device>,
    /// Simulated device latency.
    pub cost: Duration,
    /// Blocked process released when the job completes.
    pub owner: Option<Pcb>,
}
