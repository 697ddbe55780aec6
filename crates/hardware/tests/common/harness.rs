use mipsim_core::config::{IoConfig, MemoryConfig};
use mipsim_core::core::arch::Reg;
use mipsim_core::core::pipeline::{EngineConfig, QuantumOutcome, run_quantum};
use mipsim_core::sim::audit::AuditLog;
use mipsim_core::sim::process::{Pcb, Pid, ProcessState};
use mipsim_core::soc::memory::MemoryHierarchy;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// I/O settings with no latency and devices that request on every tick.
pub fn fast_io() -> IoConfig {
    IoConfig {
        device_tick_ms: 1,
        printer_one_in: 1,
        disk_one_in: 1,
        cost_unit_ms: 0,
        cost_max_units: 1,
        idle_ms: 1,
        seed: 7,
    }
}

/// One process, one memory hierarchy and an in-memory audit log.
pub struct TestContext {
    pub memory: MemoryHierarchy,
    pub pcb: Pcb,
    pub audit: AuditLog,
    pub engine: EngineConfig,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        Self {
            memory: MemoryHierarchy::new(&MemoryConfig::default()),
            pcb: Pcb::new(Pid(1), "test", 1_000, 0),
            audit: AuditLog::in_memory(),
            engine: EngineConfig::default(),
        }
    }

    pub fn with_memory(mut self, config: &MemoryConfig) -> Self {
        self.memory = MemoryHierarchy::new(config);
        self
    }

    pub fn with_quantum(mut self, quantum: u64) -> Self {
        self.pcb.quantum = quantum;
        self
    }

    pub fn non_blocking(mut self) -> Self {
        self.engine.block_on_print = false;
        self
    }

    pub fn traced(mut self) -> Self {
        self.engine.trace = true;
        self
    }

    /// Loads `words` at address 0 and points the PC at it.
    pub fn load_program(mut self, words: &[u32]) -> Self {
        self.memory.load_image(0, words).unwrap();
        self.pcb.regs.write(Reg::Pc, 0);
        self
    }

    /// Runs one quantum as the scheduler would.
    pub fn quantum(&mut self) -> QuantumOutcome {
        self.pcb.state = ProcessState::Running;
        run_quantum(&mut self.pcb, &mut self.memory, self.engine, &self.audit)
    }

    /// Runs quanta until the process finishes, treating every block as instantly serviced.
    pub fn run_to_end(&mut self, max_quanta: usize) -> Vec<QuantumOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..max_quanta {
            let outcome = self.quantum();
            outcomes.push(outcome);
            if self.pcb.state == ProcessState::Finished {
                return outcomes;
            }
        }
        panic!("process did not finish within {max_quanta} quanta");
    }

    pub fn reg(&self, reg: Reg) -> i32 {
        self.pcb.regs.read_signed(reg)
    }

    pub fn peek(&self, addr: u32) -> u32 {
        self.memory.peek(addr)
    }
}
