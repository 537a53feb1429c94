//! Main Memory Bus.
//!
//! This module implements the flat backing store that holds the ground truth for all
//! data. It provides:
//! 1. **Storage:** A word array sized from the configured byte capacity.
//! 2. **Validation:** Alignment and bounds checks on every access.
//! 3. **Initialization:** Bulk loading from an address → value image.
//! 4. **Inspection:** Read-only views of the whole store for reporting.

use std::collections::BTreeMap;

use tracing::trace;

use crate::common::constants::{MEMORY_SIZE_BYTES, WORD_SIZE};
use crate::common::{AddressError, ByteAddr};
use crate::soc::traits::WordMemory;

/// Flat, word-addressable main memory.
///
/// Words are indexed by `byte_address / 4`. Every access must be word-aligned and
/// inside `[0, capacity)`; anything else is an [`AddressError`], never a silent
/// truncation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryBus {
    words: Vec<i32>,
}

impl MemoryBus {
    /// Creates a zero-filled memory of `size_bytes` bytes.
    ///
    /// `size_bytes` is rounded down to a whole number of words.
    pub fn new(size_bytes: usize) -> Self {
        Self {
            words: vec![0; size_bytes / WORD_SIZE as usize],
        }
    }

    /// Creates a memory initialised from an address → value image.
    ///
    /// # Errors
    ///
    /// Returns the first `AddressError` produced by an entry of `image`.
    pub fn with_image(size_bytes: usize, image: &BTreeMap<u32, i32>) -> Result<Self, AddressError> {
        let mut bus = Self::new(size_bytes);
        bus.initialize(image)?;
        Ok(bus)
    }

    /// Bulk-sets words from a byte address → value mapping.
    ///
    /// Addresses not present in `image` keep their current value (zero on a
    /// fresh bus).
    ///
    /// # Errors
    ///
    /// Returns `AddressError` for the first unaligned or out-of-range address.
    pub fn initialize(&mut self, image: &BTreeMap<u32, i32>) -> Result<(), AddressError> {
        for (&addr, &value) in image {
            self.store_word(ByteAddr::new(addr), value)?;
        }
        Ok(())
    }

    /// Returns the whole store, one entry per word.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Returns every non-zero word keyed by its byte address.
    pub fn nonzero_words(&self) -> BTreeMap<u32, i32> {
        self.words
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(|(i, &v)| (ByteAddr::from_word_index(i as u32).val(), v))
            .collect()
    }

    fn index(&self, addr: ByteAddr) -> Result<usize, AddressError> {
        if !addr.is_word_aligned() {
            return Err(AddressError::Misaligned { address: addr.val() });
        }
        let idx = addr.word_index() as usize;
        if idx >= self.words.len() {
            return Err(AddressError::OutOfRange {
                address: addr.val(),
                capacity: self.capacity_bytes(),
            });
        }
        Ok(idx)
    }
}

impl Default for MemoryBus {
    /// Returns a 1 MiB zero-filled memory.
    fn default() -> Self {
        Self::new(MEMORY_SIZE_BYTES)
    }
}

impl WordMemory for MemoryBus {
    fn capacity_bytes(&self) -> u32 {
        (self.words.len() as u32).saturating_mul(WORD_SIZE)
    }

    fn load_word(&self, addr: ByteAddr) -> Result<i32, AddressError> {
        let idx = self.index(addr)?;
        let value = self.words[idx];
        trace!(addr = %addr, value, "memory load");
        Ok(value)
    }

    fn store_word(&mut self, addr: ByteAddr, value: i32) -> Result<(), AddressError> {
        let idx = self.index(addr)?;
        self.words[idx] = value;
        trace!(addr = %addr, value, "memory store");
        Ok(())
    }
}
