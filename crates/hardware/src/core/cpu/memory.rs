//! Data memory access path.
//!
//! Loads and stores go through the data cache while it is enabled and straight to the
//! backing store otherwise. This module also implements the `CACHE` instruction and the
//! flush performed when the core halts.

use std::collections::BTreeMap;

use tracing::{info, warn};

use super::Cpu;
use crate::common::{AddressError, ByteAddr, WORD_SIZE};
use crate::isa::CacheOp;
use crate::soc::MemoryBus;
use crate::soc::traits::WordMemory;

impl<M: WordMemory> Cpu<M> {
    /// Reads the word at `addr` through the active memory path.
    pub(crate) fn load(&mut self, addr: ByteAddr) -> Result<i32, AddressError> {
        match self.cache.as_mut() {
            Some(cache) if cache.is_enabled() => cache.read(addr, &mut self.memory),
            _ => self.memory.load_word(addr),
        }
    }

    /// Writes the word at `addr` through the active memory path.
    pub(crate) fn store(&mut self, addr: ByteAddr, value: i32) -> Result<(), AddressError> {
        match self.cache.as_mut() {
            Some(cache) if cache.is_enabled() => cache.write(addr, value, &mut self.memory),
            _ => self.memory.store_word(addr, value),
        }
    }

    /// Executes a `CACHE` instruction.
    pub(crate) fn cache_control(&mut self, op: CacheOp) -> Result<(), AddressError> {
        let Some(cache) = self.cache.as_mut() else {
            warn!(?op, "CACHE ignored: no data cache attached");
            return Ok(());
        };
        match op {
            CacheOp::Disable => {
                if cache.is_enabled() {
                    let _ = cache.flush(&mut self.memory)?;
                    cache.invalidate();
                    cache.set_enabled(false);
                    info!("data cache disabled");
                }
            }
            CacheOp::Enable => {
                if !cache.is_enabled() {
                    cache.set_enabled(true);
                    info!("data cache enabled");
                }
            }
            CacheOp::Flush => {
                if cache.is_enabled() {
                    let _ = cache.flush(&mut self.memory)?;
                } else {
                    warn!("CACHE 2 while the data cache is disabled; nothing to flush");
                }
            }
        }
        Ok(())
    }

    /// Stops the core, writing back dirty lines first if the cache is enabled.
    pub(crate) fn halt(&mut self) -> Result<(), AddressError> {
        let _ = self.flush_cache()?;
        self.halted = true;
        info!(pc = %ByteAddr::new(self.pc), "halted");
        Ok(())
    }

    /// Writes back every dirty line if the cache is enabled.
    ///
    /// # Returns
    ///
    /// The number of blocks written back; `0` when there is no enabled cache.
    ///
    /// # Errors
    ///
    /// Propagates the backing store's `AddressError`.
    pub fn flush_cache(&mut self) -> Result<usize, AddressError> {
        match self.cache.as_mut() {
            Some(cache) if cache.is_enabled() => cache.flush(&mut self.memory),
            _ => Ok(0),
        }
    }

    /// Returns the value a load of `addr` would observe, without side effects.
    ///
    /// A resident cached block wins over the backing store, so dirty data that has
    /// not been written back yet is visible here.
    ///
    /// # Errors
    ///
    /// Returns `AddressError` for unaligned or out-of-range addresses.
    pub fn read_memory(&self, addr: ByteAddr) -> Result<i32, AddressError> {
        let value = self.memory.load_word(addr)?;
        Ok(self
            .cache
            .as_ref()
            .and_then(|cache| cache.probe(addr))
            .unwrap_or(value))
    }
}

impl Cpu<MemoryBus> {
    /// Returns every non-zero word as seen by a load, keyed by byte address.
    ///
    /// Resident cache blocks override the backing store.
    pub fn memory_snapshot(&self) -> BTreeMap<u32, i32> {
        let mut words = self.memory.nonzero_words();
        let Some(cache) = &self.cache else {
            return words;
        };
        for (index, line) in cache.lines().iter().enumerate() {
            if !line.is_valid() {
                continue;
            }
            let base = cache.geometry().block_base(line.tag(), index).val();
            for (i, &value) in line.data().iter().enumerate() {
                let addr = base + i as u32 * WORD_SIZE;
                if value == 0 {
                    let _ = words.remove(&addr);
                } else {
                    let _ = words.insert(addr, value);
                }
            }
        }
        words
    }
}
