//! MIPS-like pipelined simulator CLI.
//!
//! This binary provides the command line front end of the simulator. It performs:
//! 1. **Run:** Loads a configuration and one or more process descriptors, runs every process
//!    to completion under the round-robin scheduler, and prints per-process metrics.
//! 2. **Disassemble:** Assembles a program file and prints one line per word.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use mipsim_core::config::Config;
use mipsim_core::isa::disasm::disassemble;
use mipsim_core::sim::AuditLog;
use mipsim_core::sim::loader;
use mipsim_core::stats::STATS_SECTIONS;
use mipsim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "mipsim",
    author,
    version,
    about = "Pipelined MIPS-like teaching simulator",
    long_about = "Run processes through a five-stage pipeline with a cache hierarchy, blocking I/O and round-robin scheduling.\n\nExamples:\n  mipsim run --process programs/adder.json\n  mipsim run --config sim.json --process a.json --process b.json --audit audit.log\n  mipsim disasm programs/adder_program.json"
)]
struct Cli {
    /// Log scheduling decisions (`debug` level) unless `RUST_LOG` is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one or more processes to completion.
    Run {
        /// Simulator configuration (JSON). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Process descriptor (JSON). Repeat for several processes.
        #[arg(short, long = "process", required = true)]
        processes: Vec<PathBuf>,

        /// Emit one trace line per pipeline stage per instruction.
        #[arg(long)]
        trace: bool,

        /// Audit log file. Audit lines are discarded when omitted.
        #[arg(long)]
        audit: Option<PathBuf>,

        /// Seed for device arrivals and I/O costs.
        #[arg(long)]
        seed: Option<u64>,

        /// Metric sections to print (summary, pipeline, memory, io). All when omitted.
        #[arg(long, value_delimiter = ',')]
        sections: Vec<String>,
    },

    /// Assemble a program file and print its disassembly.
    Disasm {
        /// Program file (JSON).
        program: PathBuf,

        /// Load origin used to resolve jump targets and data labels.
        #[arg(long, default_value_t = 0)]
        origin: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            processes,
            trace,
            audit,
            seed,
            sections,
        } => cmd_run(config.as_deref(), &processes, trace, audit.as_deref(), seed, &sections),
        Commands::Disasm { program, origin } => cmd_disasm(&program, origin),
    }
}

/// Installs the `tracing` subscriber on stderr, honouring `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {}", path.display(), e);
        process::exit(1);
    });
    Config::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {}: {}", path.display(), e);
        process::exit(1);
    })
}

/// Admits every descriptor, runs the scheduler to completion and prints metrics.
///
/// A descriptor that fails to load is reported and skipped. Exits with code 1 when no
/// process could be admitted.
fn cmd_run(
    config_path: Option<&Path>,
    processes: &[PathBuf],
    trace: bool,
    audit_path: Option<&Path>,
    seed: Option<u64>,
    sections: &[String],
) {
    if let Some(bad) = sections
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        eprintln!(
            "Error: unknown section `{}` (expected one of: {})",
            bad,
            STATS_SECTIONS.join(", ")
        );
        process::exit(2);
    }

    let mut config = load_config(config_path);
    config.general.trace_instructions |= trace;
    if let Some(seed) = seed {
        config.io.seed = seed;
    }

    let audit = match audit_path {
        Some(path) => AuditLog::to_file(path).unwrap_or_else(|e| {
            eprintln!("Error creating audit log {}: {}", path.display(), e);
            process::exit(1);
        }),
        None => AuditLog::discard(),
    };

    let mut sim = Simulator::new(&config, audit).unwrap_or_else(|e| {
        eprintln!("Error starting I/O subsystem: {}", e);
        process::exit(1);
    });

    let mut admitted = 0usize;
    for path in processes {
        match sim.admit_descriptor(path) {
            Ok(pid) => {
                println!("[*] Admitted process {} from {}", pid, path.display());
                admitted += 1;
            }
            Err(e) => error!(descriptor = %path.display(), error = %e, "admission failed"),
        }
    }
    if admitted == 0 {
        eprintln!("Error: no process could be admitted");
        process::exit(1);
    }

    println!(
        "Configuration: cache={} lines  primary={} words  secondary={} words  block_on_print={}",
        config.memory.cache_lines,
        config.memory.primary_words,
        config.memory.secondary_words,
        config.general.block_on_print
    );
    println!();

    let finished = sim.run();
    for pcb in &finished {
        pcb.stats.print_sections(&pcb.title(), sections);
    }
    println!("\n[*] {} of {} processes finished", finished.len(), admitted);
}

/// Assembles `program` at `origin` and prints `address: word  disassembly` lines.
fn cmd_disasm(program: &Path, origin: u32) {
    let words = loader::assemble_file(program, origin).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    for (addr, word) in (origin..).zip(words) {
        println!("{addr:>6}: {word:#010x}  {}", disassemble(word));
    }
}
