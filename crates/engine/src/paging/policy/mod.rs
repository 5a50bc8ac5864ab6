//! Page replacement policies.
//!
//! Implements victim selection for a full frame pool. A policy sees every
//! job's page table, not just the faulting job's, and chooses among all
//! resident pages.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Fifo`: First-In, First-Out.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use crate::paging::table::PageTable;

/// Identity of the page chosen for eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VictimRef {
    /// Job owning the victim page.
    pub job: usize,
    /// Page number of the victim within its job.
    pub page: usize,
}

/// Trait for page replacement policies.
///
/// Invoked only after allocation has failed, so at that point every frame
/// holds a resident page.
pub trait VictimPolicy: Send + Sync {
    /// Selects the page to evict.
    ///
    /// Returns `None` only when nothing is resident in any table.
    fn select_victim(&self, tables: &[PageTable]) -> Option<VictimRef>;
}
