//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! Evicts the resident page that has been loaded the longest, regardless of
//! how recently it was accessed: the entry with the smallest load tick.
//! Ties break to the lowest page number, then the lowest job id.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()` is O(P) over all page-table
//!   entries.
//! - **Best Case:** Streaming accesses where all pages have equal importance.
//! - **Worst Case:** Workloads with strong temporal locality (evicts
//!   frequently-used pages).

use super::{VictimPolicy, VictimRef};
use crate::paging::table::PageTable;

/// FIFO policy. Stateless: the ordering lives in the page-table ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl VictimPolicy for FifoPolicy {
    /// Selects the resident entry with the smallest load tick.
    fn select_victim(&self, tables: &[PageTable]) -> Option<VictimRef> {
        tables
            .iter()
            .flat_map(|table| table.resident().map(move |e| (table.job(), e)))
            .min_by_key(|&(job, e)| (e.loaded_at, e.page, job))
            .map(|(job, e)| VictimRef { job, page: e.page })
    }
}
