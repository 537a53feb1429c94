//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline constants (1 MiB memory, 16-word blocks, 64 lines).
//! 2. **Structures:** Hierarchical config for general, memory, and cache settings.
//! 3. **Validation:** Power-of-two and capacity checks the cache geometry relies on.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built with `Config::default()`.

use serde::Deserialize;
use thiserror::Error;

use crate::common::constants::{
    DEFAULT_BLOCK_WORDS, DEFAULT_CACHE_LINES, MEMORY_SIZE_BYTES, WORD_SIZE,
};

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size that must be a non-zero power of two is not.
    #[error("{field} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending field.
        field: &'static str,
        /// The value supplied.
        value: usize,
    },

    /// The memory size is not a whole number of words.
    #[error("memory size {size_bytes} is not a multiple of the word size")]
    UnalignedMemorySize {
        /// The size supplied.
        size_bytes: usize,
    },

    /// The cache is larger than the memory it fronts.
    #[error("cache of {cache_words} words does not fit in {memory_words} words of memory")]
    CacheLargerThanMemory {
        /// `block_words * num_lines`.
        cache_words: usize,
        /// Memory capacity in words.
        memory_words: usize,
    },

    /// The JSON could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Main memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Data cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` on malformed input, or any validation error.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the memory bus and cache geometry depend on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.memory.size_bytes;
        if size == 0 || size % WORD_SIZE as usize != 0 {
            return Err(ConfigError::UnalignedMemorySize { size_bytes: size });
        }
        let memory_words = self.memory.words();
        require_power_of_two("memory.size_bytes / 4", memory_words)?;
        require_power_of_two("cache.block_words", self.cache.block_words)?;
        require_power_of_two("cache.num_lines", self.cache.num_lines)?;

        let cache_words = self.cache.block_words.saturating_mul(self.cache.num_lines);
        if cache_words > memory_words {
            return Err(ConfigError::CacheLargerThanMemory {
                cache_words,
                memory_words,
            });
        }
        Ok(())
    }
}

fn require_power_of_two(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value.is_power_of_two() {
        Ok(())
    } else {
        Err(ConfigError::NotPowerOfTwo { field, value })
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log every executed instruction at `info` level instead of `debug`.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Instruction-count ceiling guarding against non-terminating programs.
    #[serde(default)]
    pub max_instructions: Option<u64>,
}

/// Main memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Capacity in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default capacity in bytes.
    const fn default_size() -> usize {
        MEMORY_SIZE_BYTES
    }

    /// Returns the capacity in words.
    pub const fn words(&self) -> usize {
        self.size_bytes / WORD_SIZE as usize
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: Self::default_size(),
        }
    }
}

/// Direct-mapped data cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Words per block (`BLOCK_SIZE`)
    #[serde(default = "CacheConfig::default_block_words")]
    pub block_words: usize,

    /// Number of lines (`NUM_LINES`)
    #[serde(default = "CacheConfig::default_num_lines")]
    pub num_lines: usize,

    /// Start with the cache enabled instead of waiting for `CACHE 1`
    #[serde(default)]
    pub enabled_at_start: bool,
}

impl CacheConfig {
    /// Returns the default block size in words.
    const fn default_block_words() -> usize {
        DEFAULT_BLOCK_WORDS
    }

    /// Returns the default number of lines.
    const fn default_num_lines() -> usize {
        DEFAULT_CACHE_LINES
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            block_words: DEFAULT_BLOCK_WORDS,
            num_lines: DEFAULT_CACHE_LINES,
            enabled_at_start: false,
        }
    }
}
