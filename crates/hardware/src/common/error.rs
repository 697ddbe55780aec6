//! Error definitions.
//!
//! This module defines the hard failures the simulator surfaces to callers. It provides:
//! 1. **Structural Errors:** Misuse of internal interfaces (`SimError`), such as naming a
//!    register that does not exist.
//! 2. **Admission Errors:** Problems reading or assembling a process descriptor or program
//!    file (`LoadError`). These abort the admission of one process only.
//!
//! Runtime data conditions (unknown opcodes, arithmetic faults, out-of-range memory) are
//! never represented here; they are absorbed by the stage that encounters them.

use std::path::PathBuf;

use thiserror::Error;

/// Structural misuse of the simulator's internal interfaces.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A register was addressed by a name absent from the ABI table.
    #[error("invalid register name `{0}`")]
    InvalidRegister(String),

    /// Two processes were admitted with the same pid.
    #[error("process id {0} is already admitted")]
    DuplicatePid(u32),
}

/// Failure to admit a process from its descriptor or program file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not read `{path}`: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("malformed JSON in `{path}`: {source}")]
    Json {
        /// Path that failed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// An instruction mnemonic is not part of the instruction set.
    #[error("instruction {index}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// Instruction index within the program.
        index: usize,
        /// Offending mnemonic.
        mnemonic: String,
    },

    /// A register operand names no register.
    #[error("instruction {index}: unknown register `{name}`")]
    UnknownRegister {
        /// Instruction index within the program.
        index: usize,
        /// Offending register name.
        name: String,
    },

    /// A branch, jump or data reference names an undefined label.
    #[error("instruction {index}: unknown label `{label}`")]
    UnknownLabel {
        /// Instruction index within the program.
        index: usize,
        /// Offending label.
        label: String,
    },

    /// A label is defined more than once.
    #[error("label `{label}` is defined more than once")]
    DuplicateLabel {
        /// Offending label.
        label: String,
    },

    /// A required operand field is absent.
    #[error("instruction {index}: `{mnemonic}` requires operand `{operand}`")]
    MissingOperand {
        /// Instruction index within the program.
        index: usize,
        /// Mnemonic being assembled.
        mnemonic: String,
        /// Name of the missing operand.
        operand: &'static str,
    },

    /// An immediate or offset does not fit its 16-bit field.
    #[error("instruction {index}: immediate {value} does not fit in 16 bits")]
    ImmediateOutOfRange {
        /// Instruction index within the program.
        index: usize,
        /// Offending value.
        value: i64,
    },

    /// The image does not fit in the memory configured for it.
    #[error("program of {words} words at origin {origin} exceeds memory of {limit} words")]
    ProgramTooLarge {
        /// Image length in words.
        words: usize,
        /// Load origin.
        origin: u32,
        /// Total addressable words.
        limit: u32,
    },

    /// The descriptor has an invalid field value.
    #[error("invalid process descriptor: {0}")]
    InvalidDescriptor(String),

    /// The scheduler refused the process.
    #[error(transparent)]
    Admission(#[from] SimError),
}
