//! Pipeline Engine Tests.
//!
//! Verifies cycle counts, drain behaviour, the final process state of a quantum and the
//! record accounting invariant `written_back + squashed == fetched`.

use mipsim_core::core::arch::Reg;
use mipsim_core::isa::encode::{end, li, print};
use mipsim_core::sim::process::ProcessState;
use mipsim_core::soc::io::request::{IoOperation, IoRequest};
use mipsim_core::sim::process::Pid;
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;
use crate::common::programs::{store_load_print, straight_line};

#[test]
fn end_alone_drains_in_five_cycles() {
    let mut ctx = TestContext::new().load_program(&[end()]);
    let outcome = ctx.quantum();

    assert_eq!(outcome.trace.cycles, 5);
    assert_eq!(outcome.trace.fetched, 1);
    assert_eq!(outcome.trace.written_back, 1);
    assert_eq!(ctx.pcb.state, ProcessState::Finished);
    assert_eq!(ctx.pcb.stats.stage_invocations, 5);
    assert!(outcome.requests.is_empty());
}

#[test]
fn store_load_print_scenario() {
    let mut ctx = TestContext::new().load_program(&store_load_print());
    let outcome = ctx.quantum();

    assert_eq!(ctx.reg(Reg::T3), 12);
    assert_eq!(ctx.reg(Reg::T4), 12);
    assert_eq!(ctx.peek(20), 12);
    assert_eq!(outcome.trace.cycles, 11);
    assert_eq!(outcome.trace.fetched, 7);
    assert_eq!(outcome.trace.written_back, 7);
    assert_eq!(
        outcome.requests,
        vec![IoRequest {
            pid: Pid(1),
            operation: IoOperation::Print,
            message: "12".into(),
        }]
    );
    // The end sentinel was fetched before the print blocked.
    assert_eq!(ctx.pcb.state, ProcessState::Finished);
    assert_eq!(ctx.pcb.stats.io_requests, 1);
}

#[test]
fn quantum_expiry_drains_and_returns_ready() {
    let mut ctx = TestContext::new()
        .with_quantum(3)
        .load_program(&straight_line(10));
    let outcome = ctx.quantum();

    assert_eq!(outcome.trace.cycles, 7);
    assert_eq!(outcome.trace.fetched, 3);
    assert_eq!(outcome.trace.written_back, 3);
    assert_eq!(ctx.reg(Reg::T0), 3);
    assert_eq!(ctx.pcb.pc(), 3);
    assert_eq!(ctx.pcb.state, ProcessState::Ready);
}

#[test]
fn resumes_where_the_previous_quantum_stopped() {
    let mut ctx = TestContext::new()
        .with_quantum(4)
        .load_program(&straight_line(10));
    let outcomes = ctx.run_to_end(10);

    assert_eq!(ctx.reg(Reg::T0), 10);
    let fetched: u64 = outcomes.iter().map(|o| o.trace.fetched).sum();
    let retired: u64 = outcomes.iter().map(|o| o.trace.written_back).sum();
    assert_eq!(fetched, 11);
    assert_eq!(retired, 11);
    assert_eq!(ctx.pcb.stats.instructions_retired, 11);
    assert_eq!(ctx.pcb.stats.pipeline_cycles, outcomes.iter().map(|o| o.trace.cycles).sum::<u64>());
}

#[test]
fn blocking_print_stops_admission_and_drains() {
    let program = [li(Reg::T0, 42), print(Reg::T0), li(Reg::T1, 1), li(Reg::T2, 2), end()];
    let mut ctx = TestContext::new().load_program(&program);
    let outcome = ctx.quantum();

    assert_eq!(ctx.pcb.state, ProcessState::Blocked);
    assert_eq!(outcome.trace.cycles, 8);
    assert_eq!(outcome.trace.fetched, 3);
    assert_eq!(outcome.trace.written_back, 3);
    assert_eq!(ctx.pcb.pc(), 3);
    // Already in flight when the print issued, so it completes.
    assert_eq!(ctx.reg(Reg::T1), 1);
    assert_eq!(ctx.reg(Reg::T2), 0);
    assert_eq!(outcome.requests.len(), 1);
    assert_eq!(outcome.requests[0].message, "42");

    let rest = ctx.quantum();
    assert_eq!(ctx.pcb.state, ProcessState::Finished);
    assert_eq!(ctx.reg(Reg::T2), 2);
    assert!(rest.requests.is_empty());
}

#[test]
fn non_blocking_print_keeps_running() {
    let program = [li(Reg::T0, 42), print(Reg::T0), li(Reg::T1, 1), li(Reg::T2, 2), end()];
    let mut ctx = TestContext::new().non_blocking().load_program(&program);
    let outcome = ctx.quantum();

    assert_eq!(ctx.pcb.state, ProcessState::Finished);
    assert_eq!(ctx.reg(Reg::T2), 2);
    assert_eq!(outcome.requests.len(), 1);
    assert_eq!(outcome.trace.fetched, 5);
}

#[test]
fn unknown_words_pass_through_as_no_ops() {
    let mut ctx = TestContext::new().load_program(&[0, li(Reg::T0, 5), 0x0C00_0000, end()]);
    let outcome = ctx.quantum();

    assert_eq!(ctx.reg(Reg::T0), 5);
    assert_eq!(outcome.trace.written_back, 4);
    assert_eq!(ctx.pcb.state, ProcessState::Finished);
}

#[test]
fn trace_writes_one_audit_line_per_stage() {
    let mut ctx = TestContext::new().traced().load_program(&[end()]);
    let _ = ctx.quantum();

    assert_eq!(
        ctx.audit.lines(),
        vec![
            "[1] IF pc=0 end",
            "[1] ID pc=0 end",
            "[1] EX pc=0 end",
            "[1] MEM pc=0 end",
            "[1] WB pc=0 end",
        ]
    );
}

#[test]
fn untraced_runs_leave_the_audit_log_empty() {
    let mut ctx = TestContext::new().load_program(&straight_line(3));
    let _ = ctx.quantum();
    assert!(ctx.audit.lines().is_empty());
}
