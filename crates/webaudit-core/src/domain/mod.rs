//! Domain models for webaudit.
//!
//! - `NetworkRecord`, `TraceEvent`: raw, read-only inputs from the gatherer
//! - `ManifestNode` / `Manifest`: parsed manifest with in-band defects
//! - `GatheredArtifacts`: the raw bag for one page snapshot
//! - `AuditResult`: the uniform audit output

pub mod error;
pub mod gathered;
pub mod manifest;
pub mod network;
pub mod result;
pub mod trace;

pub use error::{ArtifactError, AuditError, ConfigError, FieldDefect, Result, TimelineError};
pub use gathered::{
    ArtifactName, GatheredArtifacts, MetaThemeColor, PageUrl, ServiceWorkerStatus,
    ServiceWorkerVersion, ServiceWorkers,
};
pub use manifest::{Manifest, ManifestIcon, ManifestNode, PageManifest};
pub use network::{NetworkRecord, ResourceType, ResponseHeader};
pub use result::{AuditResult, AuditRunReport, RawValue};
pub use trace::{Trace, TraceEvent};
