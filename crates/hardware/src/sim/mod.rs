//! Simulation utilities and program loading.
//!
//! Provides the text loaders for programs and memory images, the end-of-run
//! report, and the [`Simulator`] facade that ties configuration to a core.

/// Program and memory image parsing.
pub mod loader;

/// End-of-run report (JSON and text).
pub mod report;

/// Configured simulator facade.
pub mod simulator;

pub use self::loader::LoadError;
pub use self::report::SimReport;
pub use self::simulator::Simulator;
