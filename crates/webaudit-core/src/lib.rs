//! webaudit core library
//!
//! Audits a captured page snapshot (network records, a performance trace, the
//! parsed web app manifest and a few DOM reads) against a catalog of
//! best-practice checks. Derived artifacts are computed once per run and
//! shared by every audit that needs them.

pub mod artifacts;
pub mod audits;
pub mod checklist;
pub mod config;
pub mod domain;
pub mod manifest;
pub mod metrics;
pub mod obs;
pub mod runner;
pub mod savings;
pub mod telemetry;
pub mod timeline;

pub use artifacts::{
    ArtifactCache, CompressionCandidate, ComputedArtifact, ManifestCheckGroup, ManifestReport,
    ManifestValues, PageTimelineArtifact, ResponseCompression,
};

pub use audits::{default_audits, AuditCategory, AuditDefinition, AuditMeta};

pub use checklist::{ChecklistItem, ChecklistReport, ChecklistResult, RuleChecklist};

pub use config::{AuditConfig, CompressionThresholds, ManifestRules};

pub use domain::{
    ArtifactError, ArtifactName, AuditError, AuditResult, AuditRunReport, ConfigError,
    FieldDefect, GatheredArtifacts, Manifest, ManifestIcon, ManifestNode, MetaThemeColor,
    NetworkRecord, PageManifest, PageUrl, RawValue, ResourceType, ResponseHeader, Result,
    ServiceWorkerStatus, ServiceWorkerVersion, ServiceWorkers, TimelineError, Trace, TraceEvent,
};

pub use manifest::parse_manifest;

pub use metrics::{MetricsSnapshot, METRICS};

pub use obs::{
    emit_artifact_computed, emit_audit_evaluated, emit_audit_skipped, emit_run_finished,
    emit_run_started, RunSpan,
};

pub use runner::{AuditRun, AuditRunner};

pub use savings::{ByteSavings, ByteSavingsEstimator, SavingsSummary, SavingsVerdict};

pub use telemetry::{init_tracing, init_tracing_from_env};

pub use timeline::{reconstruct, PageTimeline};

/// Crate version, as recorded in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
