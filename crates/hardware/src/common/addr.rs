//! Byte and word address types.
//!
//! This module defines a strong type for byte addresses so that byte/word
//! conversions happen in exactly one place. It provides the following:
//! 1. **Type Safety:** Distinguishes byte addresses from word indices and raw register values.
//! 2. **Alignment:** Word-alignment checks shared by the memory bus and the cache.
//! 3. **Effective Addresses:** Base-plus-offset computation for `LW`/`SW`.

use std::fmt;

use super::constants::{WORD_SHIFT, WORD_SIZE};
use super::error::AddressError;

/// A byte address in the simulated memory space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteAddr(pub u32);

impl ByteAddr {
    /// Creates a new byte address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Creates the byte address of the first byte of word `index`.
    #[inline(always)]
    pub const fn from_word_index(index: u32) -> Self {
        Self(index << WORD_SHIFT)
    }

    /// Returns the raw byte address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns `true` if the address is a multiple of the word size.
    #[inline(always)]
    pub const fn is_word_aligned(self) -> bool {
        self.0 % WORD_SIZE == 0
    }

    /// Returns the word index this address falls in (`addr / 4`).
    #[inline(always)]
    pub const fn word_index(self) -> u32 {
        self.0 >> WORD_SHIFT
    }

    /// Computes the effective address `base + offset` of a load or store.
    ///
    /// # Arguments
    ///
    /// * `base` - Signed register value used as the base.
    /// * `offset` - Sign-extended instruction offset.
    ///
    /// # Returns
    ///
    /// The byte address, or `AddressError::Negative` when the sum is below zero.
    /// Alignment and bounds are checked by the memory that receives the access.
    pub fn effective(base: i32, offset: i32) -> Result<Self, AddressError> {
        let sum = i64::from(base) + i64::from(offset);
        u32::try_from(sum)
            .map(Self)
            .map_err(|_| AddressError::Negative { address: sum })
    }
}

impl fmt::Display for ByteAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u32> for ByteAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}
