//! Simulation statistics collection and reporting.
//!
//! Tracks the three event counters of the paging engine and derives the
//! final summary. Counters are incremented inside the engine's critical
//! section, in the same step as the event they record, so no extra
//! synchronization lives here; the driver joins every worker before
//! reading them.

/// Aggregated fault/hit/replacement counters for one simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Accesses that found the page non-resident.
    pub faults: u64,
    /// Accesses that found the page already resident.
    pub hits: u64,
    /// Faults that required evicting a resident page.
    pub replacements: u64,
}

impl SimStats {
    /// Total page requests served.
    pub fn total_requests(&self) -> u64 {
        self.hits + self.faults
    }

    /// Hit rate in percent, or `None` when no accesses occurred.
    pub fn hit_rate_percent(&self) -> Option<f64> {
        let total = self.total_requests();
        if total == 0 {
            None
        } else {
            Some(self.hits as f64 / total as f64 * 100.0)
        }
    }

    /// Prints the summary report to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("PAGING SIMULATION STATISTICS");
        println!("==========================================================");
        println!("page_faults              {}", self.faults);
        println!("page_hits                {}", self.hits);
        println!("page_replacements        {}", self.replacements);
        println!("total_requests           {}", self.total_requests());
        match self.hit_rate_percent() {
            Some(rate) => println!("hit_rate                 {rate:.2}%"),
            None => println!("hit_rate                 undefined (no accesses)"),
        }
        println!("==========================================================");
    }
}
