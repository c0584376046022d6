//! `ResponseCompression` artifact: text responses served without compression.

use serde::Serialize;

use super::ComputedArtifact;
use crate::config::CompressionThresholds;
use crate::domain::{ArtifactError, NetworkRecord};
use crate::savings::ByteSavingsEstimator;

/// A text response that went over the wire uncompressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionCandidate {
    pub url: String,
    pub mime_type: String,
    pub resource_size: u64,
    pub estimated_compressed_size: u64,
}

#[derive(Debug, Clone)]
pub struct ResponseCompression {
    compressed_encodings: Vec<String>,
    min_candidate_bytes: u64,
    estimator: ByteSavingsEstimator,
}

impl ResponseCompression {
    pub fn new(thresholds: &CompressionThresholds) -> Self {
        Self {
            compressed_encodings: thresholds.compressed_encodings.clone(),
            min_candidate_bytes: thresholds.min_candidate_bytes,
            estimator: ByteSavingsEstimator::new(thresholds),
        }
    }

    fn is_candidate(&self, record: &NetworkRecord) -> bool {
        record.resource_type.is_text_type()
            && record.resource_size > 0
            && record.resource_size >= self.min_candidate_bytes
            && !record.is_content_encoded(&self.compressed_encodings)
    }

    /// Candidates in record order.
    pub fn candidates(&self, records: &[NetworkRecord]) -> Vec<CompressionCandidate> {
        records
            .iter()
            .filter(|r| self.is_candidate(r))
            .map(|r| CompressionCandidate {
                url: r.url.clone(),
                mime_type: r.mime_type.clone(),
                resource_size: r.resource_size,
                estimated_compressed_size: self.estimator.model_compressed_size(r.resource_size),
            })
            .collect()
    }
}

impl Default for ResponseCompression {
    fn default() -> Self {
        Self::new(&CompressionThresholds::default())
    }
}

impl ComputedArtifact for ResponseCompression {
    const NAME: &'static str = "ResponseCompression";

    type Input = [NetworkRecord];
    type Output = Vec<CompressionCandidate>;

    fn compute(&self, records: &[NetworkRecord]) -> Result<Vec<CompressionCandidate>, ArtifactError> {
        let candidates = self.candidates(records);
        tracing::debug!(
            records = records.len(),
            candidates = candidates.len(),
            "compression candidates selected"
        );
        Ok(candidates)
    }
}
