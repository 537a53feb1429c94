//! Tests for shared types.

/// Byte address helpers and effective-address computation.
pub mod address_arithmetic;
