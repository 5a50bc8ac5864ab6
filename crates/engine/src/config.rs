//! Configuration system for the paging simulator.
//!
//! This module defines the structures that parameterize a run. It provides:
//! 1. **Defaults:** Baseline constants (page size, total memory, seed).
//! 2. **Structures:** The root `Config` with per-field serde defaults.
//! 3. **Enums:** The replacement policy selector with a factory method.
//!
//! Configuration is supplied via JSON (`Config::from_json`) or use
//! `Config::default()` for the CLI.

use serde::Deserialize;

use crate::common::SimError;
use crate::paging::policy::{FifoPolicy, LruPolicy, VictimPolicy};

/// Default configuration constants for the simulator.
///
/// These values define the baseline run when not explicitly overridden.
mod defaults {
    /// Bytes per page, and per physical frame.
    pub const PAGE_SIZE: u64 = 200;

    /// Total bytes of simulated physical memory.
    ///
    /// The frame count is `ceil(TOTAL_MEMORY / PAGE_SIZE)`.
    pub const TOTAL_MEMORY: u64 = 1000;

    /// Seed for the shared pseudo-random source.
    pub const SEED: u64 = 0x00C0_FFEE;
}

/// Page replacement algorithms.
///
/// Selects which resident page is evicted when a fault finds the frame
/// pool full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyKind {
    /// Least Recently Used.
    ///
    /// Evicts the resident page with the smallest last-access tick.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// First In First Out.
    ///
    /// Evicts the resident page with the smallest load tick, regardless of
    /// how recently it was used.
    #[serde(alias = "Fifo")]
    Fifo,
}

impl PolicyKind {
    /// Builds the replacement policy implementation for this kind.
    pub fn build(self) -> Box<dyn VictimPolicy> {
        match self {
            Self::Lru => Box::new(LruPolicy),
            Self::Fifo => Box::new(FifoPolicy),
        }
    }
}

/// Root configuration for a simulation run.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use pagesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.page_size, 200);
/// assert_eq!(config.frame_count(), 5);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use pagesim_core::config::{Config, PolicyKind};
///
/// let config = Config::from_json(r#"{
///     "page_size": 100,
///     "total_memory": 800,
///     "policy": "FIFO"
/// }"#).unwrap();
/// assert_eq!(config.frame_count(), 8);
/// assert_eq!(config.policy, PolicyKind::Fifo);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bytes per page (and per frame). Must be nonzero.
    #[serde(default = "Config::default_page_size")]
    pub page_size: u64,

    /// Total simulated physical memory in bytes. Must be nonzero.
    #[serde(default = "Config::default_total_memory")]
    pub total_memory: u64,

    /// Victim selection algorithm used when the frame pool is full.
    #[serde(default)]
    pub policy: PolicyKind,

    /// Seed for the shared pseudo-random source, applied once before any
    /// worker starts.
    #[serde(default = "Config::default_seed")]
    pub seed: u64,

    /// Print a trace line for every access.
    #[serde(default)]
    pub trace_accesses: bool,
}

impl Config {
    /// Returns the default page size.
    fn default_page_size() -> u64 {
        defaults::PAGE_SIZE
    }

    /// Returns the default total memory.
    fn default_total_memory() -> u64 {
        defaults::TOTAL_MEMORY
    }

    /// Returns the default random seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Number of physical frames: `ceil(total_memory / page_size)`.
    pub fn frame_count(&self) -> usize {
        self.total_memory.div_ceil(self.page_size) as usize
    }

    /// Checks the configuration for values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when `page_size` or
    /// `total_memory` is zero.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.page_size == 0 {
            return Err(SimError::InvalidConfig("page_size must be nonzero".into()));
        }
        if self.total_memory == 0 {
            return Err(SimError::InvalidConfig(
                "total_memory must be nonzero".into(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] for malformed JSON or values
    /// rejected by [`Config::validate`].
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: defaults::PAGE_SIZE,
            total_memory: defaults::TOTAL_MEMORY,
            policy: PolicyKind::default(),
            seed: defaults::SEED,
            trace_accesses: false,
        }
    }
}
