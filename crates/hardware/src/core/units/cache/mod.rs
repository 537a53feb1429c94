//! Direct-Mapped Write-Back Cache.
//!
//! This module implements the data cache that sits in front of a [`WordMemory`]
//! backing store. It models:
//! 1. **Address decomposition:** Word address split into tag, index, and offset fields.
//! 2. **Hit/miss detection:** One candidate line per block (direct-mapped).
//! 3. **Write-back with write-allocate:** Writes land in the cache and mark the line dirty.
//! 4. **Eviction and flush:** Dirty blocks are written back at their reconstructed base address.
//!
//! All shift amounts come from the configured geometry. Block base reconstruction is
//! `base_word = (tag << (offset_bits + index_bits)) | (index << offset_bits)`, and the
//! byte address handed to memory is `base_word * 4`.

/// Cache geometry (field widths and base-address reconstruction).
pub mod geometry;

pub use self::geometry::{AddressParts, CacheGeometry};

use tracing::{debug, trace};

use crate::common::{AddressError, ByteAddr, WORD_SIZE};
use crate::soc::traits::WordMemory;
use crate::stats::CacheStats;

/// One cache line: a single block plus its state bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    valid: bool,
    dirty: bool,
    tag: u32,
    data: Vec<i32>,
}

impl CacheLine {
    fn empty(block_words: usize) -> Self {
        Self {
            valid: false,
            dirty: false,
            tag: 0,
            data: vec![0; block_words],
        }
    }

    /// Returns `true` if `data` holds a block.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns `true` if the block was modified since it was filled or last written back.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the tag of the block currently held.
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Returns the block words. Meaningful only while the line is valid.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    fn holds(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }
}

/// Direct-mapped, write-back, write-allocate data cache.
///
/// The cache never owns the backing store; every operation that may fill or evict
/// takes it as a parameter.
#[derive(Clone, Debug)]
pub struct Cache {
    geometry: CacheGeometry,
    lines: Vec<CacheLine>,
    enabled: bool,
    stats: CacheStats,
}

impl Cache {
    /// Creates an empty, disabled cache with the given geometry.
    pub fn new(geometry: CacheGeometry) -> Self {
        Self {
            lines: vec![CacheLine::empty(geometry.block_words()); geometry.num_lines()],
            geometry,
            enabled: false,
            stats: CacheStats::default(),
        }
    }

    /// Returns the cache geometry.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Returns `true` if loads and stores are routed through this cache.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggles routing. This does not flush or invalidate anything.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns all lines in index order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Returns the line at `index`, if it exists.
    pub fn line(&self, index: usize) -> Option<&CacheLine> {
        self.lines.get(index)
    }

    /// Returns the hit/miss/write-back counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reads the word at `addr`, filling its block on a miss.
    ///
    /// # Arguments
    ///
    /// * `addr` - Word-aligned byte address.
    /// * `memory` - Backing store used for fills and dirty evictions.
    ///
    /// # Errors
    ///
    /// Returns `AddressError` for unaligned or out-of-range addresses. Nothing is
    /// evicted when the address itself is invalid.
    pub fn read<M: WordMemory + ?Sized>(
        &mut self,
        addr: ByteAddr,
        memory: &mut M,
    ) -> Result<i32, AddressError> {
        let parts = self.locate(addr, &*memory)?;
        let line = self.ensure_block(parts, memory)?;
        Ok(line.data[parts.offset])
    }

    /// Writes `value` to the word at `addr` (write-allocate on a miss).
    ///
    /// The line is marked dirty; memory is not touched until eviction or flush.
    ///
    /// # Errors
    ///
    /// Returns `AddressError` for unaligned or out-of-range addresses.
    pub fn write<M: WordMemory + ?Sized>(
        &mut self,
        addr: ByteAddr,
        value: i32,
        memory: &mut M,
    ) -> Result<(), AddressError> {
        let parts = self.locate(addr, &*memory)?;
        let line = self.ensure_block(parts, memory)?;
        line.data[parts.offset] = value;
        line.dirty = true;
        Ok(())
    }

    /// Writes back every valid dirty line and marks it clean.
    ///
    /// Lines stay valid, so later reads still hit. Flushing a clean cache performs no
    /// memory writes.
    ///
    /// # Returns
    ///
    /// The number of blocks written back.
    ///
    /// # Errors
    ///
    /// Propagates the first `AddressError` from the backing store.
    pub fn flush<M: WordMemory + ?Sized>(&mut self, memory: &mut M) -> Result<usize, AddressError> {
        let mut written = 0;
        for index in 0..self.lines.len() {
            if self.lines[index].valid && self.lines[index].dirty {
                self.write_back(index, memory)?;
                written += 1;
            }
        }
        self.stats.flushes += 1;
        debug!(blocks = written, "cache flush");
        Ok(written)
    }

    /// Drops every line without writing anything back.
    ///
    /// Callers flush first when dirty data must survive.
    pub fn invalidate(&mut self) {
        for line in &mut self.lines {
            line.valid = false;
            line.dirty = false;
        }
    }

    /// Returns the cached value of `addr` if its block is resident, without side effects.
    pub fn probe(&self, addr: ByteAddr) -> Option<i32> {
        if !addr.is_word_aligned() {
            return None;
        }
        let parts = self.geometry.decompose(addr);
        let line = self.lines.get(parts.index)?;
        line.holds(parts.tag).then(|| line.data[parts.offset])
    }

    fn locate<M: WordMemory + ?Sized>(
        &self,
        addr: ByteAddr,
        memory: &M,
    ) -> Result<AddressParts, AddressError> {
        if !addr.is_word_aligned() {
            return Err(AddressError::Misaligned { address: addr.val() });
        }
        let capacity = memory.capacity_bytes();
        if addr.val() >= capacity {
            return Err(AddressError::OutOfRange {
                address: addr.val(),
                capacity,
            });
        }
        Ok(self.geometry.decompose(addr))
    }

    /// Makes the block described by `parts` resident and returns its line.
    fn ensure_block<M: WordMemory + ?Sized>(
        &mut self,
        parts: AddressParts,
        memory: &mut M,
    ) -> Result<&mut CacheLine, AddressError> {
        if self.lines[parts.index].holds(parts.tag) {
            self.stats.hits += 1;
            trace!(tag = parts.tag, index = parts.index, offset = parts.offset, "cache hit");
        } else {
            self.stats.misses += 1;
            trace!(tag = parts.tag, index = parts.index, offset = parts.offset, "cache miss");
            if self.lines[parts.index].valid && self.lines[parts.index].dirty {
                self.write_back(parts.index, memory)?;
            }
            self.fill(parts, &*memory)?;
        }
        Ok(&mut self.lines[parts.index])
    }

    /// Writes line `index` back to memory at its reconstructed base and marks it clean.
    fn write_back<M: WordMemory + ?Sized>(
        &mut self,
        index: usize,
        memory: &mut M,
    ) -> Result<(), AddressError> {
        let line = &self.lines[index];
        let base = self.geometry.block_base(line.tag, index);
        debug!(tag = line.tag, index, base = %base, "write back dirty block");
        for (i, &word) in line.data.iter().enumerate() {
            memory.store_word(ByteAddr::new(base.val() + i as u32 * WORD_SIZE), word)?;
        }
        self.lines[index].dirty = false;
        self.stats.writebacks += 1;
        Ok(())
    }

    /// Loads the block for `parts` into its line. The line is only replaced once every
    /// word has been read successfully.
    fn fill<M: WordMemory + ?Sized>(
        &mut self,
        parts: AddressParts,
        memory: &M,
    ) -> Result<(), AddressError> {
        let base = self.geometry.block_base(parts.tag, parts.index);
        let block = (0..self.geometry.block_words())
            .map(|i| memory.load_word(ByteAddr::new(base.val() + i as u32 * WORD_SIZE)))
            .collect::<Result<Vec<_>, _>>()?;
        let line = &mut self.lines[parts.index];
        line.data = block;
        line.tag = parts.tag;
        line.valid = true;
        line.dirty = false;
        Ok(())
    }
}
