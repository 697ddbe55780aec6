//! Configuration Tests.
//!
//! Verifies documented defaults and partial JSON overrides.

use mipsim_core::config::{Config, IoConfig, MemoryConfig};
use pretty_assertions::assert_eq;

#[test]
fn defaults_match_documentation() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert!(config.general.block_on_print);
    assert_eq!(
        config.memory,
        MemoryConfig {
            primary_words: 1024,
            secondary_words: 8192,
            cache_lines: 16,
        }
    );
    assert_eq!(config.memory.total_words(), 9216);
    assert_eq!(
        config.io,
        IoConfig {
            device_tick_ms: 10,
            printer_one_in: 100,
            disk_one_in: 50,
            cost_unit_ms: 100,
            cost_max_units: 3,
            idle_ms: 20,
            seed: 123_456_789,
        }
    );
    assert_eq!(config.scheduler.poll_ms, 50);
}

#[test]
fn empty_json_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_json(
        r#"{
            "general": { "block_on_print": false },
            "io": { "seed": 42, "cost_unit_ms": 0 },
            "scheduler": { "poll_ms": 5 }
        }"#,
    )
    .unwrap();
    assert!(!config.general.block_on_print);
    assert!(!config.general.trace_instructions);
    assert_eq!(config.io.seed, 42);
    assert_eq!(config.io.cost_unit_ms, 0);
    assert_eq!(config.io.printer_one_in, 100);
    assert_eq!(config.scheduler.poll_ms, 5);
    assert_eq!(config.memory, MemoryConfig::default());
}

#[test]
fn malformed_json_is_an_error() {
    assert!(Config::from_json(r#"{ "memory": { "cache_lines": "many" } }"#).is_err());
    assert!(Config::from_json("not json").is_err());
}
