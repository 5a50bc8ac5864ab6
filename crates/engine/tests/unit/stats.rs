//! Statistics tests.
//!
//! Verifies default initialization and the derived summary metrics,
//! including the zero-access guard.

use pagesim_core::stats::SimStats;
use pretty_assertions::assert_eq;

#[test]
fn default_counters_are_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.faults, 0);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.replacements, 0);
    assert_eq!(stats.total_requests(), 0);
}

#[test]
fn total_requests_sums_hits_and_faults() {
    let stats = SimStats {
        faults: 3,
        hits: 7,
        replacements: 1,
    };
    assert_eq!(stats.total_requests(), 10);
}

#[test]
fn hit_rate_is_a_percentage() {
    let stats = SimStats {
        faults: 25,
        hits: 75,
        replacements: 0,
    };
    assert_eq!(stats.hit_rate_percent(), Some(75.0));
}

#[test]
fn hit_rate_is_undefined_without_accesses() {
    assert_eq!(SimStats::default().hit_rate_percent(), None);
}

#[test]
fn all_faults_means_zero_hit_rate() {
    let stats = SimStats {
        faults: 8,
        hits: 0,
        replacements: 5,
    };
    assert_eq!(stats.hit_rate_percent(), Some(0.0));
}
