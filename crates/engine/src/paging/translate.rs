//! Logical-to-physical address translation.
//!
//! Translation is scoped to one job and never faults a page in: the caller
//! must have completed fault handling first. A non-resident page is reported
//! as a failure, not repaired here.

use crate::common::{LogicalAddr, PhysAddr, SimError};
use crate::paging::job::Job;
use crate::paging::table::PageTable;

/// Outcome of a successful translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    /// Page number the logical address falls in.
    pub page: usize,
    /// Byte offset within that page.
    pub offset: u64,
    /// Resolved physical address: `frame * page_size + offset`.
    pub physical: PhysAddr,
}

/// Translates `addr` within `job` to a physical address.
///
/// Splits the logical address into `page = addr / page_size` and
/// `offset = addr % page_size`, then resolves the page's frame through the
/// job's table.
///
/// # Errors
///
/// - [`SimError::AddressOutOfRange`] when `addr` is not in `[0, job.size)`;
///   a caller error, the access is skipped.
/// - [`SimError::MissingEntry`] when the computed page has no table entry;
///   an internal-consistency failure.
/// - [`SimError::NotResident`] when the page is not currently loaded.
pub fn translate(
    job: &Job,
    table: &PageTable,
    addr: LogicalAddr,
    page_size: u64,
) -> Result<Translation, SimError> {
    if addr.val() >= job.size {
        return Err(SimError::AddressOutOfRange {
            job: job.id,
            addr: addr.val(),
            size: job.size,
        });
    }

    let page = (addr.val() / page_size) as usize;
    let offset = addr.val() % page_size;

    let entry = table.entry(page)?;
    match entry.frame {
        Some(frame) if entry.resident => Ok(Translation {
            page,
            offset,
            physical: PhysAddr::new(frame as u64 * page_size + offset),
        }),
        _ => Err(SimError::NotResident { job: job.id, page }),
    }
}
