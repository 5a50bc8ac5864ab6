//! The shared paging engine.
//!
//! [`MemoryManager`] owns everything the workers share: the jobs, their page
//! tables, the frame pool, the replacement policy, the pseudo-random source,
//! the logical clock, and the statistics counters. One instance lives behind
//! a single mutex; holding that lock for the duration of one
//! [`MemoryManager::access`] call is the critical section that keeps the
//! residency/occupancy invariants intact between accesses.

use std::fmt;

use tracing::{debug, warn};

use crate::common::{LogicalAddr, RandomSource, SimError};
use crate::config::Config;
use crate::paging::policy::VictimPolicy;
use crate::paging::{FramePool, Job, PageTable, Translation, translate};
use crate::stats::SimStats;

/// How an access was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// The page was already resident.
    Hit,
    /// The page was loaded into a free frame.
    Fault,
    /// The page was loaded after evicting a victim to make room.
    FaultWithReplacement,
}

/// A page evicted to make room for a faulting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eviction {
    /// Job owning the evicted page.
    pub job: usize,
    /// Evicted page number.
    pub page: usize,
    /// Frame that was handed to the faulting page.
    pub frame: usize,
    /// Whether a symbolic write-back was performed (the victim was modified).
    pub wrote_back: bool,
}

/// Everything observed during one simulated access.
#[derive(Debug, Clone)]
pub struct AccessRecord {
    /// Job performing the access.
    pub job: usize,
    /// Page requested, chosen at random from the job's page list.
    pub page: usize,
    /// Hit/fault classification.
    pub kind: AccessKind,
    /// Frame holding the requested page after the access.
    pub frame: usize,
    /// Victim details when the access replaced a resident page.
    pub eviction: Option<Eviction>,
    /// Logical address chosen for resolution.
    pub addr: LogicalAddr,
    /// Resolution outcome: a translation, or the failure that prevented it.
    pub translation: Result<Translation, SimError>,
}

impl fmt::Display for AccessRecord {
    /// Formats the access as a single trace line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job {} requests page {}: ", self.job, self.page)?;
        match (self.kind, &self.eviction) {
            (AccessKind::Hit, _) => write!(f, "hit in frame {}", self.frame)?,
            (AccessKind::Fault, _) => write!(f, "fault, loaded into frame {}", self.frame)?,
            (AccessKind::FaultWithReplacement, Some(ev)) => write!(
                f,
                "fault, evicted job {} page {}{} and reused frame {}",
                ev.job,
                ev.page,
                if ev.wrote_back { " (write-back)" } else { "" },
                ev.frame,
            )?,
            // A replacement always carries its eviction; keep Display total anyway.
            (AccessKind::FaultWithReplacement, None) => write!(f, "fault with replacement")?,
        }
        match &self.translation {
            Ok(t) => write!(
                f,
                " | addr {} => page {} offset {} => physical {}",
                self.addr.val(),
                t.page,
                t.offset,
                t.physical.val(),
            ),
            Err(e) => write!(f, " | addr {} unresolved: {e}", self.addr.val()),
        }
    }
}

/// The shared engine state: one instance serves every worker.
pub struct MemoryManager {
    /// Bytes per page and per frame.
    page_size: u64,
    /// The simulated jobs, indexed by job id.
    jobs: Vec<Job>,
    /// One page table per job, indexed by job id.
    tables: Vec<PageTable>,
    /// The physical frame pool.
    pool: FramePool,
    /// Victim selection when the pool is full.
    policy: Box<dyn VictimPolicy>,
    /// Shared pseudo-random source, seeded once at construction.
    rng: Box<dyn RandomSource>,
    /// Logical clock: one tick per access, drives LRU/FIFO ordering.
    clock: u64,
    /// Fault/hit/replacement counters.
    stats: SimStats,
}

impl MemoryManager {
    /// Builds the engine from a configuration and per-job byte sizes.
    ///
    /// Jobs whose page count exceeds the frame pool are reported and kept:
    /// they run, they just fault on essentially every access.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when the configuration fails
    /// [`Config::validate`].
    pub fn new(
        config: &Config,
        job_sizes: &[u64],
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, SimError> {
        config.validate()?;

        let jobs: Vec<Job> = job_sizes
            .iter()
            .enumerate()
            .map(|(id, &size)| Job::new(id, size, config.page_size))
            .collect();
        let tables = jobs
            .iter()
            .map(|job| PageTable::new(job.id, job.page_count()))
            .collect();
        let pool = FramePool::new(config.frame_count());

        for job in &jobs {
            if job.page_count() > pool.len() {
                warn!(
                    job = job.id,
                    pages = job.page_count(),
                    frames = pool.len(),
                    "job has more pages than physical frames; replacement will run on almost every access"
                );
            }
        }

        Ok(Self {
            page_size: config.page_size,
            jobs,
            tables,
            pool,
            policy: config.policy.build(),
            rng,
            clock: 0,
            stats: SimStats::default(),
        })
    }

    /// Performs one complete simulated access for `job`.
    ///
    /// The whole step is one indivisible unit under the caller's lock:
    /// random page choice, hit/fault resolution, eviction and frame
    /// reassignment if needed, counter updates, and address resolution.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownJob`] for an id outside the simulation and
    /// propagates internal-consistency failures ([`SimError::MissingEntry`],
    /// [`SimError::NoVictim`]). Translation failures are not errors of the
    /// access itself; they are reported inside the returned record.
    pub fn access(&mut self, job: usize) -> Result<AccessRecord, SimError> {
        let (page, size) = {
            let j = self.jobs.get(job).ok_or(SimError::UnknownJob { job })?;
            debug_assert!(!j.pages.is_empty(), "zero-page jobs never enter the access loop");
            let idx = self.rng.below(j.pages.len() as u64) as usize;
            (j.pages[idx].number, j.size)
        };

        self.clock += 1;
        let now = self.clock;

        let resident_frame = {
            let entry = self.tables[job].entry(page)?;
            if entry.resident { entry.frame } else { None }
        };

        let (kind, frame, eviction) = match resident_frame {
            Some(frame) => {
                let modified = self.rng.coin();
                let entry = self.tables[job].entry_mut(page)?;
                entry.referenced = true;
                entry.last_access = now;
                entry.modified = modified;
                self.stats.hits += 1;
                (AccessKind::Hit, frame, None)
            }
            None => {
                self.stats.faults += 1;
                let (frame, eviction) = match self.pool.try_allocate(job, page) {
                    Some(frame) => (frame, None),
                    None => {
                        let ev = self.replace(job, page)?;
                        (ev.frame, Some(ev))
                    }
                };
                let entry = self.tables[job].entry_mut(page)?;
                entry.resident = true;
                entry.frame = Some(frame);
                entry.referenced = true;
                entry.loaded_at = now;
                entry.last_access = now;
                let kind = if eviction.is_some() {
                    AccessKind::FaultWithReplacement
                } else {
                    AccessKind::Fault
                };
                (kind, frame, eviction)
            }
        };

        let addr = LogicalAddr::new(self.rng.below(size));
        let translation = translate(&self.jobs[job], &self.tables[job], addr, self.page_size);

        debug_assert!(self.check_invariants().is_ok());

        Ok(AccessRecord {
            job,
            page,
            kind,
            frame,
            eviction,
            addr,
            translation,
        })
    }

    /// Selects a victim, evicts it, and hands its frame to `(job, page)`.
    ///
    /// The freed frame goes straight to the faulting page inside the same
    /// critical section; it is never observable as free.
    fn replace(&mut self, job: usize, page: usize) -> Result<Eviction, SimError> {
        let victim = self
            .policy
            .select_victim(&self.tables)
            .ok_or(SimError::NoVictim)?;
        let entry = self.tables[victim.job].entry_mut(victim.page)?;
        let frame = entry.frame.ok_or(SimError::NotResident {
            job: victim.job,
            page: victim.page,
        })?;
        let wrote_back = entry.modified;
        entry.evict();
        if wrote_back {
            debug!(
                job = victim.job,
                page = victim.page,
                frame,
                "writing modified page back to backing store (symbolic)"
            );
        }
        self.pool.reassign(frame, job, page);
        self.stats.replacements += 1;
        Ok(Eviction {
            job: victim.job,
            page: victim.page,
            frame,
            wrote_back,
        })
    }

    /// Audits the residency/occupancy invariants.
    ///
    /// Checked: resident-entry count equals occupied-frame count, every
    /// occupied frame points at an entry that points back, and every
    /// resident entry's frame holds exactly that page.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Inconsistent`] describing the first violation
    /// found.
    pub fn check_invariants(&self) -> Result<(), SimError> {
        let resident: usize = self.tables.iter().map(PageTable::resident_count).sum();
        let occupied = self.pool.occupied_count();
        if resident != occupied {
            return Err(SimError::Inconsistent(format!(
                "{resident} resident entries but {occupied} occupied frames"
            )));
        }

        for frame in self.pool.frames() {
            if let Some((job, page)) = frame.occupant {
                let entry = self
                    .tables
                    .get(job)
                    .ok_or(SimError::UnknownJob { job })?
                    .entry(page)?;
                if !entry.resident || entry.frame != Some(frame.index) {
                    return Err(SimError::Inconsistent(format!(
                        "frame {} claims job {job} page {page} but the entry does not point back",
                        frame.index
                    )));
                }
            }
        }

        for table in &self.tables {
            for entry in table.resident() {
                let Some(index) = entry.frame else {
                    return Err(SimError::Inconsistent(format!(
                        "resident page {} of job {} has no frame",
                        entry.page,
                        table.job()
                    )));
                };
                let occupant = self.pool.get(index).and_then(|f| f.occupant);
                if occupant != Some((table.job(), entry.page)) {
                    return Err(SimError::Inconsistent(format!(
                        "resident page {} of job {} points at frame {index} held by {occupant:?}",
                        entry.page,
                        table.job()
                    )));
                }
            }
        }

        Ok(())
    }

    /// The simulated jobs, indexed by job id.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// The per-job page tables, indexed by job id.
    pub fn tables(&self) -> &[PageTable] {
        &self.tables
    }

    /// The physical frame pool.
    pub fn pool(&self) -> &FramePool {
        &self.pool
    }

    /// The statistics counters accumulated so far.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Bytes per page and per frame.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }
}
