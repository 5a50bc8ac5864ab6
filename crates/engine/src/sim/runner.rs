//! Workers and the top-level simulation driver.
//!
//! One worker thread per job. Each access locks the shared engine, performs
//! the full hit/fault/translate step, optionally prints its trace line, and
//! releases the lock. Interleaving across jobs is nondeterministic at access
//! granularity but never within one access.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::common::{SimError, XorShiftRng};
use crate::config::Config;
use crate::paging::Job;
use crate::sim::manager::MemoryManager;
use crate::stats::SimStats;

/// A complete simulation: the shared engine plus the worker plan.
pub struct Simulation {
    /// The engine behind the single shared critical section.
    shared: Mutex<MemoryManager>,
    /// Accesses each job performs: its page count, fixed up front.
    accesses_per_job: Vec<usize>,
    /// Print a trace line per access.
    trace: bool,
}

impl Simulation {
    /// Builds the engine from a configuration and per-job byte sizes.
    ///
    /// The pseudo-random source is created and seeded here, once, before
    /// any worker exists.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] for a configuration the engine
    /// cannot run with.
    pub fn new(config: &Config, job_sizes: &[u64]) -> Result<Self, SimError> {
        let rng = Box::new(XorShiftRng::new(config.seed));
        let manager = MemoryManager::new(config, job_sizes, rng)?;
        let accesses_per_job = manager.jobs().iter().map(Job::page_count).collect();
        Ok(Self {
            shared: Mutex::new(manager),
            accesses_per_job,
            trace: config.trace_accesses,
        })
    }

    /// Runs every job to completion and returns the final statistics.
    ///
    /// Spawns one worker per job, joins them all, audits the invariants,
    /// and only then reads the counters; statistics are never read while a
    /// worker is still running. Running twice continues from the existing
    /// residency state.
    ///
    /// # Errors
    ///
    /// Propagates the first worker failure, [`SimError::WorkerPanicked`]
    /// for a worker that died without reporting, or
    /// [`SimError::Inconsistent`] if the final audit fails.
    pub fn run(&self) -> Result<SimStats, SimError> {
        let results: Vec<Result<(), SimError>> = thread::scope(|scope| {
            let shared = &self.shared;
            let trace = self.trace;
            let handles: Vec<_> = self
                .accesses_per_job
                .iter()
                .enumerate()
                .map(|(job, &accesses)| {
                    scope.spawn(move || run_job(shared, job, accesses, trace))
                })
                .collect();
            handles
                .into_iter()
                .enumerate()
                .map(|(job, handle)| {
                    handle
                        .join()
                        .unwrap_or(Err(SimError::WorkerPanicked { job }))
                })
                .collect()
        });
        results.into_iter().collect::<Result<(), SimError>>()?;

        let manager = lock_shared(&self.shared);
        manager.check_invariants()?;
        Ok(*manager.stats())
    }

    /// Locks and returns the shared engine, for inspection after `run`.
    pub fn manager(&self) -> MutexGuard<'_, MemoryManager> {
        lock_shared(&self.shared)
    }
}

/// Executes one job's fixed access loop against the shared engine.
///
/// A job with no pages performs no accesses and never acquires the section.
fn run_job(
    shared: &Mutex<MemoryManager>,
    job: usize,
    accesses: usize,
    trace: bool,
) -> Result<(), SimError> {
    for _ in 0..accesses {
        let mut manager = lock_shared(shared);
        let record = manager.access(job)?;
        if trace {
            // Printed while the section is held so trace order matches event order.
            println!("{record}");
        }
    }
    Ok(())
}

/// Locks the engine, recovering the inner state if another worker panicked
/// while holding the lock.
fn lock_shared(shared: &Mutex<MemoryManager>) -> MutexGuard<'_, MemoryManager> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
