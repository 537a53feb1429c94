//! Program and Memory Image Loader.
//!
//! This module turns the two text inputs of a run into simulator state. It performs:
//! 1. **Program parsing:** One instruction per line, commas and whitespace both separate
//!    operands, mnemonics are case-insensitive, `#` starts a comment line.
//! 2. **Memory image parsing:** `address,value` lines where the address is a base-2 byte
//!    address and the value is a signed decimal word.
//! 3. **File access:** Reads either input from disk with the path attached to any I/O error.
//!
//! Operand shape is not validated here; that is the decoder's job at execution time.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::common::{AddressError, ByteAddr};
use crate::isa::{Instruction, Opcode, Operand};

/// Failure to read or parse a program or memory image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// A memory image entry names an unaligned address.
    #[error("line {line}: {source}")]
    Address {
        /// 1-based line number.
        line: usize,
        /// The address violation.
        #[source]
        source: AddressError,
    },
}

/// Yields `(line_number, trimmed_text)` for every line that carries content.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_error(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_register(token: &str) -> Option<u32> {
    let digits = token.strip_prefix('R').or_else(|| token.strip_prefix('r'))?;
    digits.parse().ok()
}

/// Parses a single operand token: `R<n>`, `offset(R<n>)`, or a decimal integer.
fn parse_operand(token: &str, line: usize) -> Result<Operand, LoadError> {
    if let Some(index) = parse_register(token) {
        return Ok(Operand::Register(index));
    }
    if let Some(inner) = token.strip_suffix(')') {
        let (offset, base) = inner
            .split_once('(')
            .ok_or_else(|| parse_error(line, format!("malformed memory operand `{token}`")))?;
        let offset = if offset.is_empty() {
            0
        } else {
            offset
                .parse()
                .map_err(|_| parse_error(line, format!("invalid offset in `{token}`")))?
        };
        let base = parse_register(base)
            .ok_or_else(|| parse_error(line, format!("invalid base register in `{token}`")))?;
        return Ok(Operand::Memory { offset, base });
    }
    token
        .parse()
        .map(Operand::Immediate)
        .map_err(|_| parse_error(line, format!("unrecognised operand `{token}`")))
}

/// Parses program text into instruction records.
///
/// Unknown mnemonics are kept as [`Opcode::Unknown`] and only fail if executed.
///
/// # Errors
///
/// Returns `LoadError::Parse` for an operand that is not a register, memory
/// reference, or integer.
///
/// # Examples
///
/// ```
/// use mipsim_core::sim::loader::parse_program;
///
/// let program = parse_program("addi R1, R0, 5\n# done\nHALT\n").unwrap();
/// assert_eq!(program.len(), 2);
/// assert_eq!(program[0].to_string(), "ADDI R1,R0,5");
/// ```
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, LoadError> {
    let mut program = Vec::new();
    for (line, content) in content_lines(text) {
        let normalized = content.replace(',', " ");
        let mut tokens = normalized.split_whitespace();
        let Some(mnemonic) = tokens.next() else {
            continue;
        };
        let opcode = match mnemonic.parse::<Opcode>() {
            Ok(opcode) => opcode,
            Err(never) => match never {},
        };
        let operands = tokens
            .map(|token| parse_operand(token, line))
            .collect::<Result<Vec<_>, _>>()?;
        program.push(Instruction::new(opcode, operands));
    }
    debug!(instructions = program.len(), "program parsed");
    Ok(program)
}

/// Parses memory image text into a byte-address → value map.
///
/// Values may be written signed or as unsigned 32-bit words; `4294967295` stores the
/// same bits as `-1`. Later entries for the same address replace earlier ones.
///
/// # Errors
///
/// Returns `LoadError::Parse` for malformed lines and `LoadError::Address` for
/// addresses that are not word aligned.
pub fn parse_memory_image(text: &str) -> Result<BTreeMap<u32, i32>, LoadError> {
    let mut image = BTreeMap::new();
    for (line, content) in content_lines(text) {
        let (address, value) = content
            .split_once(',')
            .ok_or_else(|| parse_error(line, "expected `address,value`"))?;
        let address = u32::from_str_radix(address.trim(), 2)
            .map_err(|_| parse_error(line, format!("invalid binary address `{}`", address.trim())))?;
        let value = parse_word(value.trim())
            .ok_or_else(|| parse_error(line, format!("invalid value `{}`", value.trim())))?;
        if !ByteAddr::new(address).is_word_aligned() {
            return Err(LoadError::Address {
                line,
                source: AddressError::Misaligned { address },
            });
        }
        let _ = image.insert(address, value);
    }
    debug!(entries = image.len(), "memory image parsed");
    Ok(image)
}

/// Accepts `i32::MIN..=u32::MAX` and keeps the low 32 bits.
fn parse_word(text: &str) -> Option<i32> {
    let value = text.parse::<i64>().ok()?;
    (i64::from(i32::MIN)..=i64::from(u32::MAX))
        .contains(&value)
        .then_some(value as u32 as i32)
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a program file.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, or any error of [`parse_program`].
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<Instruction>, LoadError> {
    parse_program(&read_text(path.as_ref())?)
}

/// Reads and parses a memory image file.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, or any error of [`parse_memory_image`].
pub fn load_memory_image(path: impl AsRef<Path>) -> Result<BTreeMap<u32, i32>, LoadError> {
    parse_memory_image(&read_text(path.as_ref())?)
}
