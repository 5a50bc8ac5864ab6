//! Replacement policy tests.
//!
//! Builds page tables with hand-set ticks and checks victim selection for
//! both policies, including the tie-break order.

use pagesim_core::paging::PageTable;
use pagesim_core::paging::policy::{FifoPolicy, LruPolicy, VictimPolicy, VictimRef};
use pretty_assertions::assert_eq;

/// Builds a table where each `(page, loaded_at, last_access)` triple is
/// resident; the frame index mirrors the page number for simplicity.
fn table_with(job: usize, entries: &[(usize, u64, u64)]) -> PageTable {
    let max_page = entries.iter().map(|e| e.0).max().unwrap_or(0);
    let mut table = PageTable::new(job, max_page + 1);
    for &(page, loaded_at, last_access) in entries {
        let entry = table.entry_mut(page).unwrap();
        entry.resident = true;
        entry.frame = Some(page);
        entry.loaded_at = loaded_at;
        entry.last_access = last_access;
    }
    table
}

#[test]
fn lru_picks_the_smallest_last_access_tick() {
    let tables = vec![table_with(0, &[(0, 1, 9), (1, 2, 4), (2, 3, 7)])];
    assert_eq!(
        LruPolicy.select_victim(&tables),
        Some(VictimRef { job: 0, page: 1 })
    );
}

#[test]
fn lru_scans_every_jobs_table() {
    let tables = vec![table_with(0, &[(0, 1, 9)]), table_with(1, &[(0, 2, 3)])];
    assert_eq!(
        LruPolicy.select_victim(&tables),
        Some(VictimRef { job: 1, page: 0 })
    );
}

#[test]
fn lru_ties_break_to_the_lowest_page_number() {
    let tables = vec![table_with(0, &[(2, 1, 5), (1, 2, 5), (3, 3, 5)])];
    assert_eq!(
        LruPolicy.select_victim(&tables),
        Some(VictimRef { job: 0, page: 1 })
    );
}

#[test]
fn lru_ignores_non_resident_entries() {
    // Pages 0..3 exist but only page 2 is resident.
    let mut table = PageTable::new(0, 4);
    {
        let entry = table.entry_mut(2).unwrap();
        entry.resident = true;
        entry.frame = Some(0);
        entry.last_access = 99;
    }
    assert_eq!(
        LruPolicy.select_victim(&[table]),
        Some(VictimRef { job: 0, page: 2 })
    );
}

#[test]
fn fifo_picks_the_smallest_load_tick() {
    let tables = vec![table_with(0, &[(0, 5, 1), (1, 2, 9), (2, 4, 2)])];
    assert_eq!(
        FifoPolicy.select_victim(&tables),
        Some(VictimRef { job: 0, page: 1 })
    );
}

#[test]
fn fifo_ignores_recency_of_use() {
    // Page 0 is the oldest load even though it was touched most recently.
    let tables = vec![table_with(0, &[(0, 1, 100), (1, 2, 50)])];
    assert_eq!(
        FifoPolicy.select_victim(&tables),
        Some(VictimRef { job: 0, page: 0 })
    );
}

#[test]
fn no_victim_when_nothing_is_resident() {
    let tables = vec![PageTable::new(0, 4), PageTable::new(1, 2)];
    assert_eq!(LruPolicy.select_victim(&tables), None);
    assert_eq!(FifoPolicy.select_victim(&tables), None);
}
