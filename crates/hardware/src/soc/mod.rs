//! Memory-side components.
//!
//! This module organizes the components the execution core talks to for data:
//! the `WordMemory` capability trait and the flat `MemoryBus` backing store.

/// Main memory bus (flat word array).
pub mod memory;

/// Word-memory capability trait shared by backing stores and the cache.
pub mod traits;

pub use memory::MemoryBus;
pub use traits::WordMemory;
