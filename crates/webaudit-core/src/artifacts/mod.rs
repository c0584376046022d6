//! Derived artifacts.
//!
//! A computed artifact is a pure function of its declared input. The
//! [`ArtifactCache`] runs it at most once per audit run and hands every later
//! caller the same shared value (or the same failure).

pub mod cache;
pub mod manifest_values;
pub mod page_timeline;
pub mod response_compression;

pub use cache::ArtifactCache;
pub use manifest_values::{ManifestCheckGroup, ManifestReport, ManifestValues};
pub use page_timeline::PageTimelineArtifact;
pub use response_compression::{CompressionCandidate, ResponseCompression};

use crate::domain::ArtifactError;

/// A fact derived from raw gathered data.
pub trait ComputedArtifact: Send + Sync {
    /// Cache key; unique per artifact kind.
    const NAME: &'static str;

    type Input: ?Sized;
    type Output: Send + Sync + 'static;

    fn compute(&self, input: &Self::Input) -> Result<Self::Output, ArtifactError>;
}
