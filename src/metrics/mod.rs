//! Basic counters for the submission pipeline.
//!
//! Tracks how submissions end (accepted, rejected by validation, rejected by
//! the CSRF check, failed in storage) and how the commune lookup behaves.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the HTTP handlers.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    submissions_accepted: Arc<AtomicU64>,
    validation_rejections: Arc<AtomicU64>,
    csrf_rejections: Arc<AtomicU64>,
    storage_failures: Arc<AtomicU64>,
    lookups_total: Arc<AtomicU64>,
    lookup_failures: Arc<AtomicU64>,
    lookup_duration_total_ms: Arc<AtomicU64>,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_submission_accepted(&self) {
        self.submissions_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_rejection(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_csrf_rejection(&self) {
        self.csrf_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_failure(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a commune lookup with its duration.
    pub fn record_lookup(&self, duration: Duration) {
        self.lookups_total.fetch_add(1, Ordering::Relaxed);
        self.lookup_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_lookup_failure(&self) {
        self.lookup_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn submissions_accepted(&self) -> u64 {
        self.submissions_accepted.load(Ordering::Relaxed)
    }

    pub fn validation_rejections(&self) -> u64 {
        self.validation_rejections.load(Ordering::Relaxed)
    }

    pub fn csrf_rejections(&self) -> u64 {
        self.csrf_rejections.load(Ordering::Relaxed)
    }

    pub fn storage_failures(&self) -> u64 {
        self.storage_failures.load(Ordering::Relaxed)
    }

    pub fn lookups_total(&self) -> u64 {
        self.lookups_total.load(Ordering::Relaxed)
    }

    pub fn lookup_failures(&self) -> u64 {
        self.lookup_failures.load(Ordering::Relaxed)
    }

    /// Average commune lookup duration in milliseconds.
    pub fn lookup_duration_avg_ms(&self) -> f64 {
        let total = self.lookup_duration_total_ms.load(Ordering::Relaxed);
        let count = self.lookups_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            submissions_accepted: self.submissions_accepted(),
            validation_rejections: self.validation_rejections(),
            csrf_rejections: self.csrf_rejections(),
            storage_failures: self.storage_failures(),
            lookups_total: self.lookups_total(),
            lookup_failures: self.lookup_failures(),
            lookup_duration_avg_ms: self.lookup_duration_avg_ms(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub submissions_accepted: u64,
    pub validation_rejections: u64,
    pub csrf_rejections: u64,
    pub storage_failures: u64,
    pub lookups_total: u64,
    pub lookup_failures: u64,
    pub lookup_duration_avg_ms: f64,
}

/// Helper for timing commune lookups.
pub struct LookupTimer {
    start: Instant,
    metrics: Metrics,
}

impl LookupTimer {
    /// Start timing a lookup.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_lookup(self.start.elapsed());
    }

    /// Complete the timing and record as a failure.
    pub fn complete_with_error(self) {
        self.metrics.record_lookup(self.start.elapsed());
        self.metrics.record_lookup_failure();
    }
}
