//! Audit Log.
//!
//! An append-only text record of what the simulated machine did. It receives:
//! 1. **I/O Completions:** One line per serviced request, written by the I/O manager thread.
//! 2. **Instruction Trace:** One line per stage per instruction when tracing is enabled,
//!    written by the pipeline on the scheduler thread.
//!
//! Both writers share one sink behind a single lock. The log is separate from the `tracing`
//! diagnostics stream and is not meant to be parsed back into the simulator.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::common::sync::lock;
use crate::sim::process::Pid;
use crate::soc::io::request::IoOperation;

/// Where audit lines go.
#[derive(Debug)]
enum Sink {
    File(BufWriter<File>),
    Memory(Vec<String>),
    Discard,
}

/// Cloneable handle to a shared, lock-serialized audit sink.
#[derive(Debug, Clone)]
pub struct AuditLog {
    sink: Arc<Mutex<Sink>>,
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::discard()
    }
}

impl AuditLog {
    fn with_sink(sink: Sink) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Creates (or truncates) `path` and appends every line to it.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be created.
    pub fn to_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_sink(Sink::File(BufWriter::new(file))))
    }

    /// Keeps every line in memory; see [`Self::lines`].
    pub fn in_memory() -> Self {
        Self::with_sink(Sink::Memory(Vec::new()))
    }

    /// Drops every line.
    pub fn discard() -> Self {
        Self::with_sink(Sink::Discard)
    }

    /// Appends one line.
    pub fn record(&self, line: impl Into<String>) {
        let line = line.into();
        match &mut *lock(&self.sink) {
            Sink::File(w) => {
                if let Err(e) = writeln!(w, "{line}") {
                    warn!(error = %e, "audit write failed");
                }
            }
            Sink::Memory(lines) => lines.push(line),
            Sink::Discard => {}
        }
    }

    /// Records a serviced I/O request.
    pub fn io_completed(&self, pid: Pid, operation: IoOperation, message: &str) {
        self.record(format!("Process {pid} -> {operation} : {message}"));
    }

    /// Lines captured so far by an in-memory log. Empty for other sinks.
    pub fn lines(&self) -> Vec<String> {
        match &*lock(&self.sink) {
            Sink::Memory(lines) => lines.clone(),
            Sink::File(_) | Sink::Discard => Vec::new(),
        }
    }

    /// Flushes a file sink.
    ///
    /// # Errors
    ///
    /// Returns the I/O error reported by the file.
    pub fn flush(&self) -> std::io::Result<()> {
        match &mut *lock(&self.sink) {
            Sink::File(w) => w.flush(),
            Sink::Memory(_) | Sink::Discard => Ok(()),
        }
    }
}
