//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Address Types:** A strong type for byte addresses and word-index conversion.
//! 2. **Constants:** System-wide constants for words, memory, and registers.
//! 3. **Error Handling:** Address, decode, and execution errors plus the `Fault` record.
//! 4. **Register Management:** The architectural register file.

/// Byte address type and effective-address computation.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and the structured fault record.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use addr::ByteAddr;
pub use constants::{INSTRUCTION_SIZE, LINK_REGISTER, NUM_REGISTERS, WORD_SIZE};
pub use error::{AddressError, DecodeError, ErrorKind, ExecutionError, Fault, SimError};
pub use reg::RegisterFile;
