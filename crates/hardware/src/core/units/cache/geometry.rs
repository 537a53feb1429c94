//! Cache geometry.
//!
//! Field widths are derived from the configured block size and line count and
//! are measured on the *word* address (byte address / 4):
//!
//! ```text
//!   | tag (tag_bits) | index (index_bits) | offset (offset_bits) |
//!   offset_bits = log2(block_words)
//!   index_bits  = log2(num_lines)
//!   tag_bits    = address_bits - offset_bits - index_bits
//! ```

use crate::common::ByteAddr;
use crate::config::{Config, ConfigError};

/// Tag, index and offset of a word address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressParts {
    /// Identifies which block occupies the line.
    pub tag: u32,
    /// Line the block maps to.
    pub index: usize,
    /// Word within the block.
    pub offset: usize,
}

/// Validated shape of a direct-mapped cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    block_words: usize,
    num_lines: usize,
    offset_bits: u32,
    index_bits: u32,
    address_bits: u32,
}

impl CacheGeometry {
    /// Creates a geometry for a cache in front of `memory_words` words of memory.
    ///
    /// # Arguments
    ///
    /// * `block_words` - Words per block; a non-zero power of two.
    /// * `num_lines` - Number of lines; a non-zero power of two.
    /// * `memory_words` - Capacity of the backing store in words; a non-zero power of two.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a size is not a power of two or the cache is
    /// larger than the memory.
    pub fn new(
        block_words: usize,
        num_lines: usize,
        memory_words: usize,
    ) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("cache.block_words", block_words),
            ("cache.num_lines", num_lines),
            ("memory words", memory_words),
        ] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { field, value });
            }
        }
        let cache_words = block_words.saturating_mul(num_lines);
        if cache_words > memory_words {
            return Err(ConfigError::CacheLargerThanMemory {
                cache_words,
                memory_words,
            });
        }
        Ok(Self {
            block_words,
            num_lines,
            offset_bits: block_words.trailing_zeros(),
            index_bits: num_lines.trailing_zeros(),
            address_bits: memory_words.trailing_zeros(),
        })
    }

    /// Creates the geometry described by `config`.
    ///
    /// # Errors
    ///
    /// See [`CacheGeometry::new`].
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.cache.block_words,
            config.cache.num_lines,
            config.memory.words(),
        )
    }

    /// Words per block.
    pub const fn block_words(&self) -> usize {
        self.block_words
    }

    /// Number of lines.
    pub const fn num_lines(&self) -> usize {
        self.num_lines
    }

    /// `log2(block_words)`.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// `log2(num_lines)`.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of a word address.
    pub const fn address_bits(&self) -> u32 {
        self.address_bits
    }

    /// `address_bits - offset_bits - index_bits`.
    pub const fn tag_bits(&self) -> u32 {
        self.address_bits - self.offset_bits - self.index_bits
    }

    /// Splits a byte address into tag, index and offset.
    ///
    /// The byte-within-word bits are discarded; callers check alignment first.
    pub const fn decompose(&self, addr: ByteAddr) -> AddressParts {
        let word = addr.word_index();
        let offset_mask = (1u32 << self.offset_bits) - 1;
        let index_mask = (1u32 << self.index_bits) - 1;
        AddressParts {
            tag: word >> (self.offset_bits + self.index_bits),
            index: ((word >> self.offset_bits) & index_mask) as usize,
            offset: (word & offset_mask) as usize,
        }
    }

    /// Reconstructs the byte address of the first word of the block held under
    /// `tag` in line `index`.
    pub const fn block_base(&self, tag: u32, index: usize) -> ByteAddr {
        let base_word = (tag << (self.offset_bits + self.index_bits))
            | ((index as u32) << self.offset_bits);
        ByteAddr::from_word_index(base_word)
    }
}
