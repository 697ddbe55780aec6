//! I/O Subsystem Tests.
//!
//! Runs the device and manager threads with zero latency and checks that blocked processes
//! come back ready, detached requests are serviced, and every completion is audited.

use std::time::{Duration, Instant};

use mipsim_core::config::IoConfig;
use mipsim_core::sim::audit::AuditLog;
use mipsim_core::sim::process::{Pcb, Pid, ProcessState};
use mipsim_core::soc::io::IoSubsystem;
use mipsim_core::soc::io::device::{Device, DeviceFlags};
use mipsim_core::soc::io::request::IoRequest;
use mipsim_core::soc::io::rng::XorShift;
use pretty_assertions::assert_eq;

use crate::common::harness::{fast_io, init_tracing};

const WAIT: Duration = Duration::from_secs(5);

fn blocked(pid: u32) -> Pcb {
    let mut pcb = Pcb::new(Pid(pid), format!("p{pid}"), 10, 0);
    pcb.state = ProcessState::Blocked;
    pcb
}

/// Devices that never raise a request on their own.
fn quiet_io() -> IoConfig {
    IoConfig {
        printer_one_in: 0,
        disk_one_in: 0,
        ..fast_io()
    }
}

fn wait_idle(io: &IoSubsystem) {
    let deadline = Instant::now() + WAIT;
    while !io.is_idle() {
        assert!(Instant::now() < deadline, "I/O subsystem never went idle");
        std::thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn blocked_process_returns_ready_with_its_print() {
    init_tracing();
    let audit = AuditLog::in_memory();
    let io = IoSubsystem::start(fast_io(), audit.clone()).unwrap();

    io.register_process_waiting_for_io(blocked(1), vec![IoRequest::print(Pid(1), 12)]);
    let pcb = io.wait_completed(WAIT).expect("process was never released");

    assert_eq!(pcb.pid, Pid(1));
    assert_eq!(pcb.state, ProcessState::Ready);
    assert_eq!(audit.lines(), vec!["Process 1 -> print : 12"]);
    wait_idle(&io);
}

#[test]
fn pending_prints_are_joined_into_one_request() {
    init_tracing();
    let audit = AuditLog::in_memory();
    let io = IoSubsystem::start(fast_io(), audit.clone()).unwrap();

    let pending = vec![IoRequest::print(Pid(4), 1), IoRequest::print(Pid(4), -2)];
    io.register_process_waiting_for_io(blocked(4), pending);
    let _ = io.wait_completed(WAIT).expect("process was never released");

    assert_eq!(audit.lines(), vec!["Process 4 -> print : 1, -2"]);
}

#[test]
fn process_waits_until_a_device_requests() {
    init_tracing();
    let audit = AuditLog::in_memory();
    let io = IoSubsystem::start(quiet_io(), audit.clone()).unwrap();

    io.register_process_waiting_for_io(blocked(2), Vec::new());
    assert!(io.wait_completed(Duration::from_millis(30)).is_none());
    assert_eq!(io.waiting_len(), 1);
    assert!(!io.is_idle());

    io.raise(Device::Disk);
    let pcb = io.wait_completed(WAIT).expect("process was never released");
    assert_eq!(pcb.pid, Pid(2));
    assert_eq!(
        audit.lines(),
        vec!["Process 2 -> read_from_disk : Reading data from disk..."]
    );
    assert_eq!(io.waiting_len(), 0);
}

#[test]
fn processes_are_served_in_arrival_order() {
    init_tracing();
    let io = IoSubsystem::start(quiet_io(), AuditLog::discard()).unwrap();

    io.register_process_waiting_for_io(blocked(7), Vec::new());
    io.register_process_waiting_for_io(blocked(8), Vec::new());
    io.raise(Device::Printer);
    assert_eq!(io.wait_completed(WAIT).map(|p| p.pid), Some(Pid(7)));
    io.raise(Device::Printer);
    assert_eq!(io.wait_completed(WAIT).map(|p| p.pid), Some(Pid(8)));
}

#[test]
fn detached_requests_are_serviced_without_an_owner() {
    init_tracing();
    let audit = AuditLog::in_memory();
    let io = IoSubsystem::start(quiet_io(), audit.clone()).unwrap();

    io.submit(IoRequest::print(Pid(3), 99));
    wait_idle(&io);

    assert_eq!(audit.lines(), vec!["Process 3 -> print : 99"]);
    assert!(io.try_completed().is_empty());
    assert_eq!(io.queued_len(), 0);
}

#[test]
fn service_time_is_charged_to_the_owner() {
    init_tracing();
    let config = IoConfig {
        cost_unit_ms: 5,
        cost_max_units: 1,
        ..fast_io()
    };
    let io = IoSubsystem::start(config, AuditLog::discard()).unwrap();

    io.register_process_waiting_for_io(blocked(5), Vec::new());
    let pcb = io.wait_completed(WAIT).expect("process was never released");
    assert_eq!(pcb.stats.io_cycles, 5);
}

#[test]
fn shutdown_is_idempotent() {
    let mut io = IoSubsystem::start(fast_io(), AuditLog::discard()).unwrap();
    io.shutdown();
    io.shutdown();
    assert!(io.is_idle());
}

#[test]
fn device_flags_take_printer_first() {
    let mut flags = DeviceFlags::default();
    assert!(flags.raise(Device::Disk));
    assert!(flags.raise(Device::Printer));
    assert!(!flags.raise(Device::Printer));
    assert_eq!(flags.take(), Some(Device::Printer));
    assert_eq!(flags.take(), Some(Device::Disk));
    assert_eq!(flags.take(), None);
    assert!(!flags.any());
}

#[test]
fn xorshift_is_deterministic_per_seed() {
    let mut a = XorShift::new(42);
    let mut b = XorShift::new(42);
    for _ in 0..16 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
    let mut zero = XorShift::new(0);
    assert_ne!(zero.next_u64(), 0);
}

#[test]
fn xorshift_ranges() {
    let mut rng = XorShift::new(9);
    assert!(!rng.one_in(0));
    assert!(rng.one_in(1));
    for _ in 0..100 {
        let units = rng.between_one_and(3);
        assert!((1..=3).contains(&units));
    }
    assert_eq!(rng.between_one_and(0), 1);
}
