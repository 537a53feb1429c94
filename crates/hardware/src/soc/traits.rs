//! Word-memory capability trait.
//!
//! This module defines the `WordMemory` trait implemented by every backing store
//! the core and the cache can sit in front of. It provides:
//! 1. **Identification:** `capacity_bytes` for bounds reporting.
//! 2. **Access:** Word-aligned loads and stores addressed by byte address.
//!
//! The cache is written against this trait rather than a concrete memory so that
//! mocks, the flat `MemoryBus`, or banked memories can all back it.

use crate::common::{AddressError, ByteAddr};

/// Minimal load/store capability of a word-addressable backing store.
pub trait WordMemory {
    /// Returns the capacity of this memory in bytes.
    fn capacity_bytes(&self) -> u32;

    /// Loads the word at `addr`.
    ///
    /// # Errors
    ///
    /// Returns `AddressError` if `addr` is unaligned or outside `[0, capacity)`.
    fn load_word(&self, addr: ByteAddr) -> Result<i32, AddressError>;

    /// Stores `value` at `addr`.
    ///
    /// # Errors
    ///
    /// Returns `AddressError` if `addr` is unaligned or outside `[0, capacity)`.
    fn store_word(&mut self, addr: ByteAddr, value: i32) -> Result<(), AddressError>;
}
