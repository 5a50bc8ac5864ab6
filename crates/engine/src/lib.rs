//! Demand-paged virtual memory simulator library.
//!
//! This crate simulates a fixed pool of physical frames shared by multiple
//! concurrently-running jobs. It provides:
//! 1. **Paging:** Job pagination, per-job page tables, and the physical frame pool.
//! 2. **Replacement:** LRU and FIFO victim selection over every resident page.
//! 3. **Translation:** Logical-to-physical address resolution for resident pages.
//! 4. **Concurrency:** One worker per job, sharing the engine through a single critical section.
//! 5. **Statistics:** Fault/hit/replacement counters and the final summary report.

/// Common types (addresses, errors, the pseudo-random source).
pub mod common;
/// Simulator configuration (defaults, policy selection, validation).
pub mod config;
/// Paging primitives (jobs, page tables, frames, translation, policies).
pub mod paging;
/// Simulation driver (shared engine state and per-job workers).
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level simulation; construct with `Simulation::new` and call `run`.
pub use crate::sim::Simulation;
/// Final fault/hit/replacement counters.
pub use crate::stats::SimStats;
