//! Raw artifacts produced by the (external) gatherer for one page snapshot.
//!
//! `None` on a field means the gatherer never ran; "ran and found nothing" is
//! expressed inside the field's own type (e.g. [`PageManifest::Absent`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::manifest::PageManifest;
use super::network::NetworkRecord;
use super::trace::Trace;
use crate::manifest::parse_manifest;

/// Names of raw artifacts an audit may declare as required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactName {
    Url,
    NetworkRecords,
    Trace,
    Manifest,
    ServiceWorker,
    ThemeColor,
}

impl ArtifactName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::NetworkRecords => "networkRecords",
            Self::Trace => "traces",
            Self::Manifest => "Manifest",
            Self::ServiceWorker => "ServiceWorker",
            Self::ThemeColor => "ThemeColor",
        }
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested and final (post-redirect) page URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUrl {
    pub initial_url: String,
    pub final_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceWorkerStatus {
    New,
    Installing,
    Installed,
    Activating,
    Activated,
    Redundant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWorkerVersion {
    pub status: ServiceWorkerStatus,
    #[serde(rename = "scriptURL", alias = "scriptUrl")]
    pub script_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWorkers {
    pub versions: Vec<ServiceWorkerVersion>,
}

/// Content of the page's `<meta name="theme-color">` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "content", rename_all = "snake_case")]
pub enum MetaThemeColor {
    Absent,
    Content(String),
}

/// Everything the gatherer captured for one page load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatheredArtifacts {
    pub url: Option<PageUrl>,
    pub network_records: Option<Vec<NetworkRecord>>,
    pub trace: Option<Trace>,
    pub manifest: Option<PageManifest>,
    pub service_worker: Option<ServiceWorkers>,
    pub theme_color: Option<MetaThemeColor>,
    /// Estimated network throughput in bytes per second.
    pub network_throughput: Option<f64>,
}

impl GatheredArtifacts {
    pub fn has(&self, name: ArtifactName) -> bool {
        match name {
            ArtifactName::Url => self.url.is_some(),
            ArtifactName::NetworkRecords => self.network_records.is_some(),
            ArtifactName::Trace => self.trace.is_some(),
            ArtifactName::Manifest => self.manifest.is_some(),
            ArtifactName::ServiceWorker => self.service_worker.is_some(),
            ArtifactName::ThemeColor => self.theme_color.is_some(),
        }
    }

    /// Required artifacts from `names` that were not gathered.
    pub fn missing(&self, names: &[ArtifactName]) -> Vec<ArtifactName> {
        names.iter().copied().filter(|n| !self.has(*n)).collect()
    }

    /// Parse manifest text fetched from `manifest_url` for the page at
    /// `document_url` and store it.
    pub fn with_manifest_source(
        mut self,
        raw: &str,
        manifest_url: &str,
        document_url: &str,
    ) -> Self {
        self.manifest = Some(PageManifest::Fetched(parse_manifest(
            raw,
            manifest_url,
            document_url,
        )));
        self
    }
}
