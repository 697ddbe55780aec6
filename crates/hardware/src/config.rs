//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize the machine. It
//! provides:
//! 1. **Defaults:** Baseline constants for memory sizes, device behaviour and polling.
//! 2. **Structures:** Hierarchical config for general, memory, I/O and scheduler settings.
//!
//! Configuration is read from JSON; every field is optional and falls back to its default.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Words of primary store (addresses `0..PRIMARY_WORDS`).
    pub const PRIMARY_WORDS: u32 = 1024;

    /// Words of secondary store, addressed from `PRIMARY_WORDS` upward.
    pub const SECONDARY_WORDS: u32 = 8192;

    /// Lines in the fully associative cache.
    pub const CACHE_LINES: usize = 16;

    /// Period of the device-arrival loop in milliseconds.
    pub const DEVICE_TICK_MS: u64 = 10;

    /// The printer raises a request with probability `1 / PRINTER_ONE_IN` per tick.
    pub const PRINTER_ONE_IN: u32 = 100;

    /// The disk raises a request with probability `1 / DISK_ONE_IN` per tick.
    pub const DISK_ONE_IN: u32 = 50;

    /// Simulated latency of one I/O cost unit in milliseconds.
    pub const COST_UNIT_MS: u64 = 100;

    /// A request costs between 1 and `COST_MAX_UNITS` units.
    pub const COST_MAX_UNITS: u32 = 3;

    /// Idle sleep of the I/O manager when nothing is queued.
    pub const IDLE_MS: u64 = 20;

    /// Seed of the device and cost pseudo-random generator.
    pub const SEED: u64 = 123_456_789;

    /// Wait between scheduler polls when only blocked processes remain.
    pub const POLL_MS: u64 = 50;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use mipsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.memory.primary_words, 1024);
/// assert!(config.general.block_on_print);
///
/// let json = r#"{ "memory": { "cache_lines": 4 }, "io": { "cost_unit_ms": 0 } }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.memory.cache_lines, 4);
/// assert_eq!(config.memory.secondary_words, 8192);
/// assert_eq!(config.io.cost_unit_ms, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Memory hierarchy sizes
    pub memory: MemoryConfig,
    /// Device and I/O manager behaviour
    pub io: IoConfig,
    /// Scheduler loop settings
    pub scheduler: SchedulerConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Emit one trace event per stage per instruction to the audit log and `tracing`.
    pub trace_instructions: bool,

    /// Whether `PRINT` blocks the issuing process until its request is serviced.
    ///
    /// Applies to both the register and the memory form.
    pub block_on_print: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            block_on_print: true,
        }
    }
}

/// Memory hierarchy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Words of primary store; also the address boundary of the secondary range.
    pub primary_words: u32,
    /// Words of secondary store.
    pub secondary_words: u32,
    /// Cache capacity in lines.
    pub cache_lines: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            primary_words: defaults::PRIMARY_WORDS,
            secondary_words: defaults::SECONDARY_WORDS,
            cache_lines: defaults::CACHE_LINES,
        }
    }
}

impl MemoryConfig {
    /// Total addressable words across both tiers.
    pub const fn total_words(&self) -> u32 {
        self.primary_words.saturating_add(self.secondary_words)
    }
}

/// I/O subsystem configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Device-arrival loop period in milliseconds.
    pub device_tick_ms: u64,
    /// Printer request odds (`1 / n` per tick). `0` disables the printer.
    pub printer_one_in: u32,
    /// Disk request odds (`1 / n` per tick). `0` disables the disk.
    pub disk_one_in: u32,
    /// Milliseconds per cost unit.
    pub cost_unit_ms: u64,
    /// Upper bound of cost units per request (at least 1).
    pub cost_max_units: u32,
    /// Manager idle sleep when the request queue is empty.
    pub idle_ms: u64,
    /// Pseudo-random generator seed.
    pub seed: u64,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            device_tick_ms: defaults::DEVICE_TICK_MS,
            printer_one_in: defaults::PRINTER_ONE_IN,
            disk_one_in: defaults::DISK_ONE_IN,
            cost_unit_ms: defaults::COST_UNIT_MS,
            cost_max_units: defaults::COST_MAX_UNITS,
            idle_ms: defaults::IDLE_MS,
            seed: defaults::SEED,
        }
    }
}

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Wait in milliseconds when every remaining process is blocked.
    pub poll_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_ms: defaults::POLL_MS,
        }
    }
}
