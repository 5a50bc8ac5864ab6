//! Simulation driver.
//!
//! The shared engine state lives in [`manager`]; [`runner`] spawns one
//! worker per job against it and joins them before the statistics are read.

/// The shared paging engine behind the critical section.
pub mod manager;

/// Workers and the top-level simulation driver.
pub mod runner;

pub use manager::{AccessKind, AccessRecord, Eviction, MemoryManager};
pub use runner::Simulation;
