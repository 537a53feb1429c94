//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Word Constants:** Word and instruction sizes, and the byte/word shift.
//! 2. **Memory Constants:** Default backing-store capacity.
//! 3. **Register Constants:** Register count and the link register index.
//! 4. **Encoding Limits:** Ranges accepted for immediates and offsets.

/// Size of a data word in bytes.
pub const WORD_SIZE: u32 = 4;

/// Number of bits to shift to convert between byte addresses and word indices.
pub const WORD_SHIFT: u32 = 2;

/// Size of one instruction slot in bytes; the program counter advances by this.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Default backing-store capacity in bytes (1 MiB).
pub const MEMORY_SIZE_BYTES: usize = 1_048_576;

/// Default backing-store capacity in words.
pub const MEMORY_SIZE_WORDS: usize = MEMORY_SIZE_BYTES / WORD_SIZE as usize;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// Register written with the return address by `JAL`.
pub const LINK_REGISTER: usize = 7;

/// Default cache block size in words.
pub const DEFAULT_BLOCK_WORDS: usize = 16;

/// Default number of direct-mapped cache lines.
pub const DEFAULT_CACHE_LINES: usize = 64;

/// Smallest memory offset (and branch byte displacement) accepted by the decoder.
pub const OFFSET_MIN: i64 = i16::MIN as i64;

/// Largest memory offset (and branch byte displacement) accepted by the decoder.
pub const OFFSET_MAX: i64 = i16::MAX as i64;

/// Smallest BNE offset, in instructions: the byte displacement `offset × 4` must fit 16 bits.
pub const BRANCH_OFFSET_MIN: i64 = OFFSET_MIN / 4;

/// Largest BNE offset, in instructions.
pub const BRANCH_OFFSET_MAX: i64 = OFFSET_MAX / 4;
