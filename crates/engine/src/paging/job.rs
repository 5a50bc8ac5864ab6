//! Job definitions and pagination.
//!
//! A job is split into fixed-size pages once, at setup. The split is pure
//! and deterministic: `ceil(size / page_size)` pages, where the last page
//! carries the remainder of the job's size, or a full page when the size
//! divides evenly.

/// One fixed-size unit of a job's logical address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    /// Page number, unique and dense from zero within the owning job.
    pub number: usize,
    /// Bytes of job content held by this page.
    pub len: u64,
}

/// A simulated job: an identifier, a byte size, and its ordered pages.
#[derive(Debug, Clone)]
pub struct Job {
    /// Job identifier, dense from zero across the simulation.
    pub id: usize,
    /// Total size of the job in bytes. Immutable after setup.
    pub size: u64,
    /// Ordered pages covering `size` bytes.
    pub pages: Vec<PageDescriptor>,
}

impl Job {
    /// Splits a job of `size` bytes into pages of `page_size` bytes.
    ///
    /// A job of zero bytes has no pages and completes without ever touching
    /// memory. Otherwise the page count is `ceil(size / page_size)` and the
    /// last page holds `size % page_size` bytes, or a full page when the
    /// remainder is zero.
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero; `Config::validate` rejects that before
    /// any job is built.
    pub fn new(id: usize, size: u64, page_size: u64) -> Self {
        assert!(page_size > 0, "page_size must be nonzero");
        let num_pages = size.div_ceil(page_size) as usize;
        let pages = (0..num_pages)
            .map(|number| {
                let len = if number + 1 == num_pages {
                    match size % page_size {
                        0 => page_size,
                        rem => rem,
                    }
                } else {
                    page_size
                };
                PageDescriptor { number, len }
            })
            .collect();
        Self { id, size, pages }
    }

    /// Number of pages the job occupies.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Bytes lost to internal fragmentation: the unused tail of the last
    /// page. Zero for empty jobs and for sizes that divide evenly.
    pub fn internal_fragmentation(&self, page_size: u64) -> u64 {
        self.pages.last().map_or(0, |last| page_size - last.len)
    }
}
