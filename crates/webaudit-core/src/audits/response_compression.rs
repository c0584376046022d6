//! `uses-request-compression`: text responses are served compressed.

use serde_json::json;

use super::{AuditCategory, AuditDefinition, AuditMeta};
use crate::artifacts::CompressionCandidate;
use crate::config::CompressionThresholds;
use crate::domain::{ArtifactName, AuditResult, RawValue};
use crate::runner::AuditRun;
use crate::savings::{bytes_to_kb_string, wasted_ms, ByteSavingsEstimator, KB_IN_BYTES};

pub const META: AuditMeta = AuditMeta {
    name: "uses-request-compression",
    category: AuditCategory::Performance,
    description: "Compression enabled for server responses",
    help_text: "Text-based responses should be served with compression (gzip, deflate or \
                brotli) to minimize total network bytes.",
    required_artifacts: &[ArtifactName::NetworkRecords],
};

pub fn definition() -> AuditDefinition {
    AuditDefinition {
        meta: META,
        evaluate,
    }
}

fn evaluate(run: &AuditRun) -> AuditResult {
    match run.compression_candidates() {
        Ok(candidates) => assess(
            &candidates,
            &run.config().compression,
            run.artifacts().network_throughput,
        ),
        Err(err) => AuditResult::fail(err.to_string()),
    }
}

/// Grade `candidates` against `thresholds`. `throughput` is in bytes per second.
pub fn assess(
    candidates: &[CompressionCandidate],
    thresholds: &CompressionThresholds,
    throughput: Option<f64>,
) -> AuditResult {
    let estimator = ByteSavingsEstimator::new(thresholds);
    let summary = estimator.summarize(
        candidates
            .iter()
            .map(|c| (c.url.as_str(), c.resource_size, Some(c.estimated_compressed_size))),
    );

    let total = summary.total_wasted_bytes;
    let ms = wasted_ms(total, throughput);
    let debug_string = (!summary.passes).then(|| {
        format!(
            "{} of compressible responses exceed the {} budget.",
            bytes_to_kb_string(total),
            bytes_to_kb_string(thresholds.total_wasted_bytes_ceiling)
        )
    });
    let display_value = (total > 0).then(|| match ms {
        Some(ms) => format!("Potential savings of {} (~{ms} ms)", bytes_to_kb_string(total)),
        None => format!("Potential savings of {}", bytes_to_kb_string(total)),
    });

    AuditResult {
        raw_value: RawValue::Bool(summary.passes),
        debug_string,
        display_value,
        extended_info: Some(json!({
            "wastedKb": (total as f64 / KB_IN_BYTES).round(),
            "wastedMs": ms,
            "ignored": summary.ignored,
            "duplicates": summary.duplicates,
            "tableHeadings": {
                "url": "Uncompressed resource URL",
                "totalKb": "Original",
                "potentialSavings": "GZIP Savings",
            },
            "results": summary.rows,
        })),
    }
}
