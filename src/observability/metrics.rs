//! Thread-safe metrics collection
//!
//! Atomic counters for request outcomes plus mutex-protected tallies of the
//! task types and complexities handed out.

use crate::classifier::ClassificationResult;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Global metrics collector instance
pub static METRICS: Lazy<MetricsCollector> = Lazy::new(MetricsCollector::new);

/// Get reference to global metrics collector
pub fn metrics() -> &'static MetricsCollector {
    &METRICS
}

/// Thread-safe metrics collector using atomics and mutexes
pub struct MetricsCollector {
    requests_received: AtomicU64,
    batch_requests: AtomicU64,
    requests_rejected: AtomicU64,
    classification_failures: AtomicU64,
    classifications_completed: AtomicU64,
    total_classification_micros: AtomicU64,
    started_at: AtomicU64,

    by_task_type: Mutex<BTreeMap<String, u64>>,
    by_complexity: Mutex<BTreeMap<String, u64>>,
}

/// Point-in-time copy of all metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_received: u64,
    pub batch_requests: u64,
    pub requests_rejected: u64,
    pub classification_failures: u64,
    pub classifications_completed: u64,
    pub avg_classification_micros: f64,
    pub uptime_seconds: u64,
    pub by_task_type: BTreeMap<String, u64>,
    pub by_complexity: BTreeMap<String, u64>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            requests_received: AtomicU64::new(0),
            batch_requests: AtomicU64::new(0),
            requests_rejected: AtomicU64::new(0),
            classification_failures: AtomicU64::new(0),
            classifications_completed: AtomicU64::new(0),
            total_classification_micros: AtomicU64::new(0),
            started_at: AtomicU64::new(current_timestamp()),
            by_task_type: Mutex::new(BTreeMap::new()),
            by_complexity: Mutex::new(BTreeMap::new()),
        }
    }

    /// Record an incoming classification request
    pub fn request_received(&self, batch: bool) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
        if batch {
            self.batch_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a request refused before classification
    pub fn request_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a classifier failure
    pub fn classification_failed(&self) {
        self.classification_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one produced classification and the time spent on it
    pub fn classification_completed(&self, result: &ClassificationResult, elapsed: Duration) {
        self.classifications_completed
            .fetch_add(1, Ordering::Relaxed);
        self.total_classification_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);

        if let Ok(mut by_type) = self.by_task_type.lock() {
            *by_type.entry(result.task_type.to_string()).or_insert(0) += 1;
        }
        if let Ok(mut by_complexity) = self.by_complexity.lock() {
            *by_complexity
                .entry(result.complexity.to_string())
                .or_insert(0) += 1;
        }
    }

    /// Copy out current values
    pub fn get_metrics(&self) -> MetricsSnapshot {
        let completed = self.classifications_completed.load(Ordering::Relaxed);
        let total_micros = self.total_classification_micros.load(Ordering::Relaxed);
        let avg_classification_micros = if completed == 0 {
            0.0
        } else {
            total_micros as f64 / completed as f64
        };

        MetricsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            batch_requests: self.batch_requests.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            classification_failures: self.classification_failures.load(Ordering::Relaxed),
            classifications_completed: completed,
            avg_classification_micros,
            uptime_seconds: self.uptime_seconds(),
            by_task_type: self
                .by_task_type
                .lock()
                .map(|m| m.clone())
                .unwrap_or_default(),
            by_complexity: self
                .by_complexity
                .lock()
                .map(|m| m.clone())
                .unwrap_or_default(),
        }
    }

    /// Seconds since this collector was created
    pub fn uptime_seconds(&self) -> u64 {
        current_timestamp().saturating_sub(self.started_at.load(Ordering::Relaxed))
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix time in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
