//! Mock memories for isolating the cache and the core from the real bus.
