//! Structured observability hooks for audit runs.
//!
//! This module provides:
//! - Run-scoped tracing spans via the `RunSpan` RAII guard
//! - Emission functions for run start/finish, artifact computation and audit evaluation
//!
//! Events are emitted at `info!` level, artifact events at `debug!`.

use tracing::{debug, info, warn};

/// RAII guard that enters a run-scoped tracing span for the duration of a run.
///
/// # Example
///
/// ```ignore
/// let _span = RunSpan::enter("5f0c...");
/// // every event below is associated with run_id = "5f0c..."
/// ```
pub struct RunSpan {
    _span: tracing::span::EnteredSpan,
}

impl RunSpan {
    /// Create and enter a span tagged with the run_id.
    pub fn enter(run_id: &str) -> Self {
        Self {
            _span: run_span(run_id).entered(),
        }
    }
}

/// The run-scoped span, unentered. Use with `Instrument` across `.await`
/// points, where an entered guard cannot be held.
pub fn run_span(run_id: &str) -> tracing::Span {
    tracing::info_span!("webaudit.run", run_id = %run_id)
}

/// Emit event: run started with the number of audits scheduled.
pub fn emit_run_started(run_id: &str, audit_count: usize) {
    info!(event = "run.started", run_id = %run_id, audit_count = audit_count);
}

/// Emit event: a derived artifact was computed (first request in the run).
pub fn emit_artifact_computed(artifact: &str, ok: bool, elapsed_us: u64) {
    debug!(
        event = "artifact.computed",
        artifact = %artifact,
        ok = ok,
        elapsed_us = elapsed_us,
    );
}

/// Emit event: one audit produced its result.
pub fn emit_audit_evaluated(run_id: &str, audit: &str, passed: bool) {
    info!(event = "audit.evaluated", run_id = %run_id, audit = %audit, passed = passed);
}

/// Emit event: an audit was not evaluated because raw artifacts were missing.
pub fn emit_audit_skipped(run_id: &str, audit: &str, missing: &str) {
    warn!(event = "audit.skipped", run_id = %run_id, audit = %audit, missing = %missing);
}

/// Emit event: run finished with duration, failure count and the number of
/// artifacts this run computed.
pub fn emit_run_finished(
    run_id: &str,
    duration_ms: u64,
    audits: usize,
    failed: usize,
    artifacts_computed: usize,
) {
    info!(
        event = "run.finished",
        run_id = %run_id,
        duration_ms = duration_ms,
        audits = audits,
        failed = failed,
        artifacts_computed = artifacts_computed,
    );
}
