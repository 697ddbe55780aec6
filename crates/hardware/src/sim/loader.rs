//! Program and Process Loader.
//!
//! This module turns files on disk into admitted processes. It performs:
//! 1. **Descriptor Parsing:** Reads a process descriptor (`pid`, `name`, `quantum`,
//!    `priority`, optional memory weights, program path and load origin).
//! 2. **Assembly:** Translates a JSON program into instruction words in two passes. The
//!    first pass assigns addresses to code and data labels, the second encodes.
//! 3. **Image Placement:** Copies the image into the backing stores and builds the
//!    process control block with its program counter at the load origin.
//!
//! A program file is either pre-assembled (`{"words": [...]}`) or source
//! (`{"data": {...}, "program": [...]}`). Every image ends with the `END` sentinel, which is
//! appended when the program does not already end with one. Data words follow the code.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::common::constants::{END_SENTINEL, TARGET26_MASK};
use crate::common::error::LoadError;
use crate::core::arch::reg::Reg;
use crate::isa::encode;
use crate::sim::process::{MemWeights, Pcb, Pid};
use crate::soc::memory::MemoryHierarchy;

/// Quantum used when a descriptor does not name one.
pub const DEFAULT_QUANTUM: u64 = 20;

const fn default_quantum() -> u64 {
    DEFAULT_QUANTUM
}

/// A process descriptor file.
///
/// # Examples
///
/// ```
/// use mipsim_core::sim::loader::ProcessDescriptor;
///
/// let desc: ProcessDescriptor =
///     serde_json::from_str(r#"{ "pid": 7, "name": "adder", "program": "adder.json" }"#).unwrap();
/// assert_eq!(desc.quantum, 20);
/// assert_eq!(desc.priority, 0);
/// assert!(desc.mem_weights.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessDescriptor {
    /// Process identifier; unique per run.
    pub pid: Pid,
    /// Human-readable name.
    pub name: String,
    /// Pipeline cycles per dispatch.
    #[serde(default = "default_quantum")]
    pub quantum: u64,
    /// Informational priority.
    #[serde(default)]
    pub priority: i32,
    /// Memory-tier cost weights; defaults apply when absent.
    pub mem_weights: Option<MemWeights>,
    /// Program file. Relative paths are resolved against the descriptor's directory.
    pub program: PathBuf,
    /// Load address. When absent the next free address is used.
    pub origin: Option<u32>,
}

/// A program file, pre-assembled or source.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProgramFile {
    /// Raw instruction and data words.
    Words {
        /// Image words, starting at the load origin.
        words: Vec<u32>,
    },
    /// Assembly source.
    Source(ProgramSource),
}

/// Assembly source: named data and a list of instructions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramSource {
    /// Data labels, placed after the code in label order.
    #[serde(default)]
    pub data: BTreeMap<String, DataValue>,
    /// Instructions in program order.
    pub program: Vec<SourceLine>,
}

/// Initial contents of a data label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    /// A single word.
    Word(i64),
    /// Consecutive words.
    Words(Vec<i64>),
}

impl DataValue {
    fn values(&self) -> &[i64] {
        match self {
            Self::Word(v) => std::slice::from_ref(v),
            Self::Words(vs) => vs,
        }
    }
}

/// One source instruction. Which operands are read depends on the mnemonic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceLine {
    /// Optional label naming this instruction.
    pub label: Option<String>,
    /// Mnemonic, any case.
    pub instruction: String,
    /// R-type destination register.
    pub rd: Option<String>,
    /// First source register.
    pub rs: Option<String>,
    /// Target register.
    pub rt: Option<String>,
    /// Immediate value, or the literal of `blti`/`bgti`.
    pub immediate: Option<i64>,
    /// Base-relative offset, or a raw branch offset.
    pub offset: Option<i64>,
    /// Memory operand: `"off(base)"` or a data label.
    pub addr: Option<String>,
    /// Base register for `offset`.
    pub base: Option<String>,
    /// Branch or jump label.
    pub target: Option<String>,
    /// Absolute word address for `j`, `print` or a memory operand.
    pub address: Option<i64>,
}

/// Result of [`load_process`].
#[derive(Debug)]
pub struct LoadedProcess {
    /// The new process, ready to admit.
    pub pcb: Pcb,
    /// Address the image was placed at.
    pub origin: u32,
    /// Image length in words.
    pub len: u32,
}

impl LoadedProcess {
    /// First address after the image.
    pub const fn end(&self) -> u32 {
        self.origin.saturating_add(self.len)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a process descriptor and resolves its program path.
///
/// # Errors
///
/// Returns [`LoadError::Io`] or [`LoadError::Json`] for an unreadable file, and
/// [`LoadError::InvalidDescriptor`] for a zero quantum.
pub fn load_descriptor(path: &Path) -> Result<ProcessDescriptor, LoadError> {
    let mut desc: ProcessDescriptor = read_json(path)?;
    if desc.quantum == 0 {
        return Err(LoadError::InvalidDescriptor(format!(
            "process {}: quantum must be at least 1",
            desc.pid
        )));
    }
    if desc.program.is_relative() {
        if let Some(dir) = path.parent() {
            desc.program = dir.join(&desc.program);
        }
    }
    Ok(desc)
}

/// Reads and assembles a program file for placement at `origin`.
///
/// # Errors
///
/// Returns the first read, parse or encoding error.
pub fn assemble_file(path: &Path, origin: u32) -> Result<Vec<u32>, LoadError> {
    match read_json::<ProgramFile>(path)? {
        ProgramFile::Words { mut words } => {
            if words.last() != Some(&END_SENTINEL) {
                words.push(END_SENTINEL);
            }
            Ok(words)
        }
        ProgramFile::Source(source) => assemble(&source, origin),
    }
}

/// Assembles source for placement at `origin`.
///
/// # Returns
///
/// Code words, the `END` sentinel if the code lacks one, then data words.
///
/// # Errors
///
/// Returns the first label, operand or range error.
pub fn assemble(source: &ProgramSource, origin: u32) -> Result<Vec<u32>, LoadError> {
    Assembler::new(source, origin)?.encode()
}

/// Loads the process a descriptor file describes into memory.
///
/// # Arguments
///
/// * `path` - Descriptor file.
/// * `memory` - Hierarchy whose backing stores receive the image.
/// * `next_origin` - Load address used when the descriptor names none.
///
/// # Errors
///
/// Returns any descriptor, assembly or placement error. Memory is untouched on error.
pub fn load_process(
    path: &Path,
    memory: &mut MemoryHierarchy,
    next_origin: u32,
) -> Result<LoadedProcess, LoadError> {
    place_process(load_descriptor(path)?, memory, next_origin)
}

/// Assembles a descriptor's program and places it in memory.
///
/// # Errors
///
/// Returns any assembly or placement error. Memory is untouched on error.
pub fn place_process(
    desc: ProcessDescriptor,
    memory: &mut MemoryHierarchy,
    next_origin: u32,
) -> Result<LoadedProcess, LoadError> {
    let origin = desc.origin.unwrap_or(next_origin);
    let words = assemble_file(&desc.program, origin)?;
    memory.load_image(origin, &words)?;
    let len = u32::try_from(words.len()).unwrap_or(u32::MAX);
    debug!(pid = %desc.pid, origin, len, program = %desc.program.display(), "image loaded");

    let pcb = Pcb::new(desc.pid, desc.name, desc.quantum, origin)
        .with_priority(desc.priority)
        .with_weights(desc.mem_weights.unwrap_or_default());
    Ok(LoadedProcess { pcb, origin, len })
}

/// Label tables built by the first pass.
struct Assembler<'a> {
    source: &'a ProgramSource,
    origin: u32,
    code_len: usize,
    code: HashMap<&'a str, usize>,
    data: HashMap<&'a str, u32>,
}

impl<'a> Assembler<'a> {
    fn needs_end(source: &ProgramSource) -> bool {
        source
            .program
            .last()
            .is_none_or(|line| !line.instruction.trim().eq_ignore_ascii_case("end"))
    }

    fn new(source: &'a ProgramSource, origin: u32) -> Result<Self, LoadError> {
        let code_len = source.program.len() + usize::from(Self::needs_end(source));
        let mut code = HashMap::new();
        for (index, line) in source.program.iter().enumerate() {
            if let Some(label) = line.label.as_deref() {
                if code.insert(label, index).is_some() {
                    return Err(LoadError::DuplicateLabel {
                        label: label.to_owned(),
                    });
                }
            }
        }

        let mut data = HashMap::new();
        let mut next = u64::from(origin) + code_len as u64;
        for (label, value) in &source.data {
            if code.contains_key(label.as_str()) {
                return Err(LoadError::DuplicateLabel {
                    label: label.clone(),
                });
            }
            let addr = u32::try_from(next).map_err(|_| LoadError::ProgramTooLarge {
                words: code_len,
                origin,
                limit: u32::MAX,
            })?;
            let _ = data.insert(label.as_str(), addr);
            next += value.values().len() as u64;
        }

        Ok(Self {
            source,
            origin,
            code_len,
            code,
            data,
        })
    }

    fn encode(&self) -> Result<Vec<u32>, LoadError> {
        let mut words = Vec::with_capacity(self.code_len);
        for (index, line) in self.source.program.iter().enumerate() {
            words.push(self.encode_line(index, line)?);
        }
        if words.len() < self.code_len {
            words.push(END_SENTINEL);
        }
        for (label, value) in &self.source.data {
            for v in value.values() {
                let word = i32::try_from(*v)
                    .map(|w| w as u32)
                    .or_else(|_| u32::try_from(*v))
                    .map_err(|_| {
                        LoadError::InvalidDescriptor(format!(
                            "data `{label}`: value {v} does not fit in 32 bits"
                        ))
                    })?;
                words.push(word);
            }
        }
        Ok(words)
    }

    fn encode_line(&self, index: usize, line: &SourceLine) -> Result<u32, LoadError> {
        let op = line.instruction.trim().to_ascii_lowercase();
        let reg = |operand: &'static str, value: &Option<String>| {
            register(index, &op, operand, value.as_deref())
        };

        let word = match op.as_str() {
            "add" | "sub" | "mult" | "div" | "and" => {
                let rd = reg("rd", &line.rd)?;
                let rs = reg("rs", &line.rs)?;
                let rt = reg("rt", &line.rt)?;
                match op.as_str() {
                    "add" => encode::add(rd, rs, rt),
                    "sub" => encode::sub(rd, rs, rt),
                    "mult" => encode::mult(rd, rs, rt),
                    "div" => encode::div(rd, rs, rt),
                    _ => encode::and(rd, rs, rt),
                }
            }
            "addi" => {
                let rt = reg("rt", &line.rt)?;
                let rs = reg("rs", &line.rs)?;
                let imm = required(index, &op, "immediate", line.immediate)?;
                encode::addi(rt, rs, imm16(index, imm)?)
            }
            "li" => {
                let rt = reg("rt", &line.rt)?;
                let imm = required(index, &op, "immediate", line.immediate)?;
                encode::li(rt, imm16(index, imm)?)
            }
            "la" | "lw" | "sw" => {
                let rt = reg("rt", &line.rt)?;
                let (base, offset) = self.memory_operand(index, &op, line)?;
                match op.as_str() {
                    "la" => encode::la(rt, base, offset),
                    "lw" => encode::lw(rt, base, offset),
                    _ => encode::sw(rt, base, offset),
                }
            }
            "beq" | "bne" | "blt" | "bgt" => {
                let rs = reg("rs", &line.rs)?;
                let rt = reg("rt", &line.rt)?;
                let offset = self.branch_offset(index, &op, line)?;
                match op.as_str() {
                    "beq" => encode::beq(rs, rt, offset),
                    "bne" => encode::bne(rs, rt, offset),
                    "blt" => encode::blt(rs, rt, offset),
                    _ => encode::bgt(rs, rt, offset),
                }
            }
            "blti" | "bgti" => {
                let rs = reg("rs", &line.rs)?;
                let literal = required(index, &op, "immediate", line.immediate)?;
                let literal = u32::try_from(literal)
                    .ok()
                    .filter(|l| *l < 32)
                    .ok_or(LoadError::ImmediateOutOfRange {
                        index,
                        value: literal,
                    })?;
                let offset = self.branch_offset(index, &op, line)?;
                if op == "blti" {
                    encode::blti(rs, literal, offset)
                } else {
                    encode::bgti(rs, literal, offset)
                }
            }
            "j" => encode::j(self.jump_target(index, &op, line)?),
            "print" => match line.rt.as_deref() {
                Some(name) => encode::print(register(index, &op, "rt", Some(name))?),
                None => {
                    let addr = self.absolute_address(index, &op, line)?;
                    if addr == 0 {
                        return Err(LoadError::ImmediateOutOfRange { index, value: 0 });
                    }
                    encode::print_mem(addr)
                }
            },
            "end" => encode::end(),
            _ => {
                return Err(LoadError::UnknownMnemonic {
                    index,
                    mnemonic: line.instruction.clone(),
                });
            }
        };
        Ok(word)
    }

    /// Resolves `addr` (`"off(base)"` or a data label), `base` + `offset`, or `address`.
    fn memory_operand(
        &self,
        index: usize,
        op: &str,
        line: &SourceLine,
    ) -> Result<(Reg, i16), LoadError> {
        if let Some(text) = line.addr.as_deref() {
            if let Some((offset, rest)) = text.split_once('(') {
                let name = rest.trim().trim_end_matches(')');
                let base = register(index, op, "addr", Some(name))?;
                let offset = offset.trim();
                let offset = if offset.is_empty() {
                    0
                } else {
                    offset
                        .parse::<i64>()
                        .map_err(|_| LoadError::UnknownLabel {
                            index,
                            label: offset.to_owned(),
                        })?
                };
                return Ok((base, imm16(index, offset)?));
            }
        }
        if let Some(name) = line.base.as_deref() {
            let base = register(index, op, "base", Some(name))?;
            return Ok((base, imm16(index, line.offset.unwrap_or(0))?));
        }
        Ok((Reg::Zero, self.absolute_address(index, op, line)?))
    }

    /// Resolves a data label in `addr`, or the numeric `address`.
    fn absolute_address(&self, index: usize, op: &str, line: &SourceLine) -> Result<i16, LoadError> {
        if let Some(label) = line.addr.as_deref() {
            let label = label.trim();
            let value = match self.data.get(label) {
                Some(addr) => i64::from(*addr),
                None => label.parse::<i64>().map_err(|_| LoadError::UnknownLabel {
                    index,
                    label: label.to_owned(),
                })?,
            };
            return imm16(index, value);
        }
        let value = required(index, op, "addr", line.address)?;
        imm16(index, value)
    }

    /// PC-relative offset to `target`, or the raw `offset`.
    fn branch_offset(&self, index: usize, op: &str, line: &SourceLine) -> Result<i16, LoadError> {
        if let Some(label) = line.target.as_deref() {
            let dest = self.code_label(index, label)?;
            return imm16(index, dest as i64 - (index as i64 + 1));
        }
        let offset = required(index, op, "target", line.offset)?;
        imm16(index, offset)
    }

    /// Absolute word address of `target`, or the raw `address`.
    fn jump_target(&self, index: usize, op: &str, line: &SourceLine) -> Result<u32, LoadError> {
        let value = match line.target.as_deref() {
            Some(label) => u64::from(self.origin) + self.code_label(index, label)? as u64,
            None => {
                let raw = required(index, op, "target", line.address)?;
                u64::try_from(raw).map_err(|_| LoadError::ImmediateOutOfRange { index, value: raw })?
            }
        };
        u32::try_from(value)
            .ok()
            .filter(|t| *t <= TARGET26_MASK)
            .ok_or(LoadError::ImmediateOutOfRange {
                index,
                value: i64::try_from(value).unwrap_or(i64::MAX),
            })
    }

    fn code_label(&self, index: usize, label: &str) -> Result<usize, LoadError> {
        self.code
            .get(label.trim())
            .copied()
            .ok_or_else(|| LoadError::UnknownLabel {
                index,
                label: label.to_owned(),
            })
    }
}

fn missing(index: usize, op: &str, operand: &'static str) -> LoadError {
    LoadError::MissingOperand {
        index,
        mnemonic: op.to_owned(),
        operand,
    }
}

fn required<T>(index: usize, op: &str, operand: &'static str, value: Option<T>) -> Result<T, LoadError> {
    value.ok_or_else(|| missing(index, op, operand))
}

fn register(index: usize, op: &str, operand: &'static str, name: Option<&str>) -> Result<Reg, LoadError> {
    let name = name.ok_or_else(|| missing(index, op, operand))?;
    Reg::from_name(name)
        .ok()
        .filter(|r| r.is_gpr())
        .ok_or_else(|| LoadError::UnknownRegister {
            index,
            name: name.to_owned(),
        })
}

fn imm16(index: usize, value: i64) -> Result<i16, LoadError> {
    i16::try_from(value).map_err(|_| LoadError::ImmediateOutOfRange { index, value })
}
