//! Engine error definitions.
//!
//! One enum covers every failure the engine can signal. The variants fall
//! into two classes: internal-consistency defects that are fatal to a run
//! (a page without a table entry, an audit failure) and reportable
//! conditions the caller handles per access (an out-of-range address, a
//! translation against a non-resident page).

use thiserror::Error;

/// Errors raised by the paging engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A requested page number has no page-table entry.
    ///
    /// Pagination builds an entry for every page of every job, so hitting
    /// this means the shared state is corrupt. Fatal, never recoverable.
    #[error("no page-table entry for page {page} of job {job}")]
    MissingEntry {
        /// Job whose table was consulted.
        job: usize,
        /// Page number that had no entry.
        page: usize,
    },

    /// A job id outside the simulation was used.
    #[error("job {job} does not exist in this simulation")]
    UnknownJob {
        /// The offending job id.
        job: usize,
    },

    /// A logical address fell outside the owning job's address space.
    ///
    /// A caller error: the access is reported and skipped, not fatal.
    #[error("logical address {addr} outside job {job} (size {size} bytes)")]
    AddressOutOfRange {
        /// Job the address was resolved against.
        job: usize,
        /// The offending byte offset.
        addr: u64,
        /// The job's size in bytes.
        size: u64,
    },

    /// Translation was attempted against a page that is not resident.
    ///
    /// Translation never faults a page in; the caller must complete fault
    /// handling first.
    #[error("page {page} of job {job} is not resident")]
    NotResident {
        /// Job owning the page.
        job: usize,
        /// The non-resident page number.
        page: usize,
    },

    /// Replacement was requested but no page is resident anywhere.
    ///
    /// Can only happen with a zero-frame pool, which `Config::validate`
    /// rejects.
    #[error("replacement requested but no page is resident")]
    NoVictim,

    /// The residency/occupancy audit found the shared state inconsistent.
    #[error("shared state inconsistent: {0}")]
    Inconsistent(String),

    /// Rejected configuration values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A worker thread panicked mid-run.
    #[error("worker for job {job} panicked")]
    WorkerPanicked {
        /// Job whose worker died.
        job: usize,
    },
}
