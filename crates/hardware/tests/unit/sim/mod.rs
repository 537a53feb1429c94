//! Tests for the simulation front end.

/// Program and memory image parsing.
pub mod loader;
