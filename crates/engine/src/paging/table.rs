//! Per-job page tables.
//!
//! One table per job, one entry per page, indexed by page number. Entries
//! record residency, the assigned frame, the modified/referenced flags, and
//! the two ticks the replacement policies order by. Entries are mutated only
//! while the engine's critical section is held.

use crate::common::SimError;

/// Per-page record of residency, frame assignment, and access metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    /// Page number within the owning job.
    pub page: usize,
    /// Whether the page currently occupies a frame.
    pub resident: bool,
    /// Index of the frame holding the page, when resident.
    pub frame: Option<usize>,
    /// Set when the page content was modified while resident.
    pub modified: bool,
    /// Set on every access while resident; cleared on eviction.
    pub referenced: bool,
    /// Tick at which the page was last loaded into a frame.
    pub loaded_at: u64,
    /// Tick of the most recent access to the page.
    pub last_access: u64,
}

impl PageTableEntry {
    /// The initial, non-resident entry for `page`: no frame, zeroed ticks.
    fn vacant(page: usize) -> Self {
        Self {
            page,
            resident: false,
            frame: None,
            modified: false,
            referenced: false,
            loaded_at: 0,
            last_access: 0,
        }
    }

    /// Clears residency state after the page is chosen as a victim.
    pub fn evict(&mut self) {
        self.resident = false;
        self.frame = None;
        self.referenced = false;
        self.modified = false;
    }
}

/// The page table for one job.
#[derive(Debug, Clone)]
pub struct PageTable {
    /// Owning job id, carried into consistency errors.
    job: usize,
    /// One entry per page, indexed by page number.
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    /// Builds the initial table for a job with `pages` pages: every entry
    /// non-resident with zeroed ticks.
    pub fn new(job: usize, pages: usize) -> Self {
        Self {
            job,
            entries: (0..pages).map(PageTableEntry::vacant).collect(),
        }
    }

    /// The job this table belongs to.
    pub fn job(&self) -> usize {
        self.job
    }

    /// Looks up the entry for `page`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MissingEntry`] when `page` has no entry. Every
    /// page produced by pagination has one, so a miss here is an
    /// internal-consistency failure, not a recoverable condition.
    pub fn entry(&self, page: usize) -> Result<&PageTableEntry, SimError> {
        self.entries
            .get(page)
            .ok_or(SimError::MissingEntry { job: self.job, page })
    }

    /// Mutable variant of [`PageTable::entry`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MissingEntry`] when `page` has no entry.
    pub fn entry_mut(&mut self, page: usize) -> Result<&mut PageTableEntry, SimError> {
        let job = self.job;
        self.entries
            .get_mut(page)
            .ok_or(SimError::MissingEntry { job, page })
    }

    /// Iterates over every entry in page-number order.
    pub fn entries(&self) -> impl Iterator<Item = &PageTableEntry> {
        self.entries.iter()
    }

    /// Iterates over the currently resident entries.
    pub fn resident(&self) -> impl Iterator<Item = &PageTableEntry> {
        self.entries.iter().filter(|e| e.resident)
    }

    /// Number of resident entries.
    pub fn resident_count(&self) -> usize {
        self.resident().count()
    }

    /// Number of pages (and entries) in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no pages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
