//! Process-wide counters for the artifact cache and the audit runner.
//!
//! Incrementing is silent apart from a `trace!` event. [`Metrics::flush`]
//! emits a [`MetricsSnapshot`] as one `info!` event at the end of each run.
//! The counters are cumulative for the process, so the snapshot (and its
//! cache hit ratio) covers every run so far. Per-run artifact counts are on
//! the `run.finished` event.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Atomic counters; no allocation, no locking.
pub struct Metrics {
    artifacts_computed: AtomicU64,
    artifact_cache_hits: AtomicU64,
    audits_evaluated: AtomicU64,
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub artifacts_computed: u64,
    pub artifact_cache_hits: u64,
    pub audits_evaluated: u64,
}

impl MetricsSnapshot {
    /// Share of artifact requests answered from the cache, in `[0, 1]`.
    pub fn cache_hit_ratio(&self) -> f64 {
        let requests = self.artifacts_computed + self.artifact_cache_hits;
        if requests == 0 {
            0.0
        } else {
            self.artifact_cache_hits as f64 / requests as f64
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            artifacts_computed: AtomicU64::new(0),
            artifact_cache_hits: AtomicU64::new(0),
            audits_evaluated: AtomicU64::new(0),
        }
    }

    /// A derived artifact was computed (cache miss).
    pub fn inc_artifacts_computed(&self) {
        self.artifacts_computed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "artifacts_computed", "counter incremented");
    }

    /// A derived artifact was served from the cache.
    pub fn inc_cache_hits(&self) {
        self.artifact_cache_hits.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "artifact_cache_hits", "counter incremented");
    }

    pub fn inc_audits_evaluated(&self) {
        self.audits_evaluated.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "audits_evaluated", "counter incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            artifacts_computed: self.artifacts_computed(),
            artifact_cache_hits: self.artifact_cache_hits(),
            audits_evaluated: self.audits_evaluated(),
        }
    }

    /// Emit the cumulative snapshot as a single `info!` event.
    pub fn flush(&self) {
        let s = self.snapshot();
        tracing::info!(
            metric = "flush",
            artifacts_computed = s.artifacts_computed,
            artifact_cache_hits = s.artifact_cache_hits,
            audits_evaluated = s.audits_evaluated,
            cache_hit_ratio = s.cache_hit_ratio(),
        );
    }

    pub fn artifacts_computed(&self) -> u64 {
        self.artifacts_computed.load(Ordering::Relaxed)
    }

    pub fn artifact_cache_hits(&self) -> u64 {
        self.artifact_cache_hits.load(Ordering::Relaxed)
    }

    pub fn audits_evaluated(&self) -> u64 {
        self.audits_evaluated.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.artifacts_computed.store(0, Ordering::Relaxed);
        self.artifact_cache_hits.store(0, Ordering::Relaxed);
        self.audits_evaluated.store(0, Ordering::Relaxed);
    }
}
