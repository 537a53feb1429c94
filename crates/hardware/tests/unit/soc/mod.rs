//! Tests for the memory side.
