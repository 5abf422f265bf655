//! Counters for dataset loads and dashboard queries
//!
//! Counters only, monotonic, reset only on process start. Relaxed atomics:
//! counts are exact, cross-counter consistency is not promised.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    datasets_loaded: AtomicU64,
    load_failures: AtomicU64,
    cache_hits: AtomicU64,
    rows_loaded: AtomicU64,
    rows_dropped: AtomicU64,
    queries_executed: AtomicU64,
    queries_rejected: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Dataset

    pub fn increment_datasets_loaded(&self) {
        self.datasets_loaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_load_failures(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cache_hits(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_rows_loaded(&self, rows: u64) {
        self.rows_loaded.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn add_rows_dropped(&self, rows: u64) {
        self.rows_dropped.fetch_add(rows, Ordering::Relaxed);
    }

    // Queries

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            datasets_loaded: self.datasets_loaded.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            rows_loaded: self.rows_loaded.load(Ordering::Relaxed),
            rows_dropped: self.rows_dropped.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub datasets_loaded: u64,
    pub load_failures: u64,
    pub cache_hits: u64,
    pub rows_loaded: u64,
    pub rows_dropped: u64,
    pub queries_executed: u64,
    pub queries_rejected: u64,
}
