//! Audit runs.
//!
//! An [`AuditRun`] owns one page snapshot, the config and the artifact cache
//! for that snapshot. [`AuditRunner`] evaluates a list of audits against it,
//! either one after another or on the tokio blocking pool. Both paths share
//! the same cache, so each derived artifact is computed once per run no matter
//! how many audits ask for it.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::artifacts::{
    ArtifactCache, CompressionCandidate, ComputedArtifact, ManifestReport, ManifestValues,
    PageTimelineArtifact, ResponseCompression,
};
use crate::audits::{default_audits, AuditDefinition};
use crate::config::AuditConfig;
use crate::domain::{
    ArtifactError, ArtifactName, AuditError, AuditResult, AuditRunReport, GatheredArtifacts, Result,
};
use crate::metrics::METRICS;
use crate::obs;
use crate::timeline::PageTimeline;

/// One page snapshot under audit.
#[derive(Debug)]
pub struct AuditRun {
    id: Uuid,
    artifacts: GatheredArtifacts,
    config: Arc<AuditConfig>,
    cache: ArtifactCache,
}

fn not_gathered(artifact: &str, raw: ArtifactName) -> ArtifactError {
    ArtifactError::MissingPrerequisite {
        artifact: artifact.to_string(),
        reason: format!("{raw} was not gathered"),
    }
}

impl AuditRun {
    pub fn new(artifacts: GatheredArtifacts, config: Arc<AuditConfig>) -> Self {
        Self {
            id: Uuid::new_v4(),
            artifacts,
            config,
            cache: ArtifactCache::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn artifacts(&self) -> &GatheredArtifacts {
        &self.artifacts
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn cache(&self) -> &ArtifactCache {
        &self.cache
    }

    /// The evaluated manifest checklist.
    pub fn manifest_values(&self) -> std::result::Result<Arc<ManifestReport>, ArtifactError> {
        let page = self
            .artifacts
            .manifest
            .as_ref()
            .ok_or_else(|| not_gathered(ManifestValues::NAME, ArtifactName::Manifest))?;
        self.cache.get_or_compute(ManifestValues::NAME, || {
            ManifestValues::new(&self.config.manifest).compute(page)
        })
    }

    /// The timeline of the traced page load.
    pub fn page_timeline(&self) -> std::result::Result<Arc<PageTimeline>, ArtifactError> {
        let trace = self
            .artifacts
            .trace
            .as_ref()
            .ok_or_else(|| not_gathered(PageTimelineArtifact::NAME, ArtifactName::Trace))?;
        self.cache.request(&PageTimelineArtifact, trace)
    }

    /// Text responses served without compression.
    pub fn compression_candidates(
        &self,
    ) -> std::result::Result<Arc<Vec<CompressionCandidate>>, ArtifactError> {
        let records = self.artifacts.network_records.as_deref().ok_or_else(|| {
            not_gathered(ResponseCompression::NAME, ArtifactName::NetworkRecords)
        })?;
        self.cache.get_or_compute(ResponseCompression::NAME, || {
            ResponseCompression::new(&self.config.compression).compute(records)
        })
    }
}

/// Evaluate one audit, short-circuiting when a required raw artifact is absent.
fn evaluate_audit(run: &AuditRun, audit: &AuditDefinition) -> AuditResult {
    let run_id = run.id.to_string();
    let missing = run.artifacts.missing(audit.meta.required_artifacts);
    if let Some(first) = missing.first() {
        obs::emit_audit_skipped(&run_id, audit.name(), first.as_str());
        return AuditResult::fail(format!("Required {first} gatherer did not run."));
    }

    let result = (audit.evaluate)(run);
    METRICS.inc_audits_evaluated();
    obs::emit_audit_evaluated(&run_id, audit.name(), result.passed());
    result
}

/// Evaluates a fixed list of audits against page snapshots.
#[derive(Debug, Clone)]
pub struct AuditRunner {
    audits: Vec<AuditDefinition>,
    config: Arc<AuditConfig>,
}

impl Default for AuditRunner {
    fn default() -> Self {
        Self::new(AuditConfig::default())
    }
}

impl AuditRunner {
    /// A runner with every built-in audit.
    pub fn new(config: AuditConfig) -> Self {
        Self::with_audits(config, default_audits())
    }

    /// A runner with every built-in audit, configured from the TOML file at
    /// `path` with `WEBAUDIT_*` environment overrides applied on top.
    pub fn load(path: &Path) -> Result<Self> {
        let config = AuditConfig::load(path)?.with_env_overrides()?;
        Ok(Self::new(config))
    }

    pub fn with_audits(config: AuditConfig, audits: Vec<AuditDefinition>) -> Self {
        Self {
            audits,
            config: Arc::new(config),
        }
    }

    pub fn audits(&self) -> &[AuditDefinition] {
        &self.audits
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Start a run over `artifacts` using this runner's config.
    pub fn start(&self, artifacts: GatheredArtifacts) -> AuditRun {
        AuditRun::new(artifacts, Arc::clone(&self.config))
    }

    /// Evaluate every audit sequentially.
    pub fn run(&self, artifacts: GatheredArtifacts) -> AuditRunReport {
        self.evaluate(&self.start(artifacts))
    }

    /// Evaluate every audit sequentially against an existing run.
    pub fn evaluate(&self, run: &AuditRun) -> AuditRunReport {
        let run_id = run.id.to_string();
        let _span = obs::RunSpan::enter(&run_id);
        let started = Instant::now();
        obs::emit_run_started(&run_id, self.audits.len());

        let audits: BTreeMap<String, AuditResult> = self
            .audits
            .iter()
            .map(|audit| (audit.name().to_string(), evaluate_audit(run, audit)))
            .collect();

        finish(run, audits, started)
    }

    /// Evaluate every audit concurrently on the blocking pool.
    ///
    /// Audits sharing a derived artifact wait only for its first computation.
    /// A panicking audit is a defect and surfaces as
    /// [`AuditError::TaskFailed`].
    pub async fn run_concurrent(&self, artifacts: GatheredArtifacts) -> Result<AuditRunReport> {
        self.evaluate_concurrent(Arc::new(self.start(artifacts)))
            .await
    }

    /// Concurrent evaluation against an existing run.
    pub async fn evaluate_concurrent(&self, run: Arc<AuditRun>) -> Result<AuditRunReport> {
        let run_id = run.id.to_string();
        let span = obs::run_span(&run_id);

        async move {
            let started = Instant::now();
            obs::emit_run_started(&run_id, self.audits.len());

            let mut tasks: Vec<(&'static str, JoinHandle<AuditResult>)> =
                Vec::with_capacity(self.audits.len());
            for audit in self.audits.iter().copied() {
                let run = Arc::clone(&run);
                let span = tracing::Span::current();
                let task = tokio::task::spawn_blocking(move || {
                    span.in_scope(|| evaluate_audit(&run, &audit))
                });
                tasks.push((audit.name(), task));
            }

            let mut audits = BTreeMap::new();
            for (name, task) in tasks {
                let result = task.await.map_err(|e| AuditError::TaskFailed {
                    audit: name.to_string(),
                    reason: e.to_string(),
                })?;
                audits.insert(name.to_string(), result);
            }

            Ok(finish(&run, audits, started))
        }
        .instrument(span)
        .await
    }
}

fn finish(run: &AuditRun, audits: BTreeMap<String, AuditResult>, started: Instant) -> AuditRunReport {
    let report = AuditRunReport {
        run_id: run.id,
        generated_at: Utc::now(),
        audits,
    };
    obs::emit_run_finished(
        &run.id.to_string(),
        started.elapsed().as_millis() as u64,
        report.audits.len(),
        report.failed().len(),
        run.cache.computations(),
    );
    METRICS.flush();
    report
}
