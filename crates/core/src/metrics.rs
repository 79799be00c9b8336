//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Sync runs (runs, pages fetched, cards scraped, duration)
//! - Lookups (outcomes, matches per query)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Sync Metrics
// =============================================================================

/// Sync runs total by result.
pub static SYNC_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cardex_sync_runs_total", "Total catalog sync runs"),
        &["result"], // "success", "failed", "rejected"
    )
    .unwrap()
});

/// Sync run duration in seconds.
pub static SYNC_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("cardex_sync_duration_seconds", "Duration of catalog sync runs")
            .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 300.0, 900.0, 1800.0, 3600.0]),
        &["result"],
    )
    .unwrap()
});

/// Pages fetched total by result.
pub static PAGES_FETCHED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cardex_pages_fetched_total", "Total set pages fetched"),
        &["result"], // "card", "empty", "failed"
    )
    .unwrap()
});

/// Cards scraped total.
pub static CARDS_SCRAPED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("cardex_cards_scraped_total", "Total cards added to the catalog").unwrap()
});

// =============================================================================
// Lookup Metrics
// =============================================================================

/// Lookups total by reply kind.
pub static LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cardex_lookups_total", "Total card lookups"),
        &["result"], // "no_match", "single", "paged", "group"
    )
    .unwrap()
});

/// Matches returned per resolved query.
pub static MATCHES_PER_QUERY: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "cardex_matches_per_query",
            "Number of catalog matches per lookup query",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 10.0, 25.0]),
    )
    .unwrap()
});

/// All core metrics, for registration by the server.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Sync
        Box::new(SYNC_RUNS.clone()),
        Box::new(SYNC_DURATION.clone()),
        Box::new(PAGES_FETCHED.clone()),
        Box::new(CARDS_SCRAPED.clone()),
        // Lookup
        Box::new(LOOKUPS.clone()),
        Box::new(MATCHES_PER_QUERY.clone()),
    ]
}
