//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Reads the word at the PC through the memory hierarchy.
//! 2. **Decode:** Classifies the word and extracts its operand fields.
//! 3. **Execute:** Runs the ALU, resolves branches, and issues register prints.
//! 4. **Memory:** Services loads, immediate loads and memory prints.
//! 5. **Writeback:** Commits stores and retires the record.
//!
//! Every stage except fetch operates on the record index the engine hands it. Records with
//! an unknown encoding pass through every stage as a no-op.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
