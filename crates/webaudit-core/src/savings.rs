//! Byte savings model shared by the compression audits.
//!
//! A resource is *ignored* (neither counted nor failed) when compression barely
//! helps (compressed/original ratio above the configured ratio) or when the
//! absolute savings fall under the configured byte floor. A page passes while
//! the total wasted bytes of counted resources stay under the ceiling.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::CompressionThresholds;

pub const KB_IN_BYTES: f64 = 1024.0;

/// Savings for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ByteSavings {
    pub total_bytes: u64,
    pub compressed_bytes: u64,
    pub wasted_bytes: u64,
    pub wasted_percent: f64,
}

impl ByteSavings {
    pub fn new(total_bytes: u64, compressed_bytes: u64) -> Self {
        let compressed_bytes = compressed_bytes.min(total_bytes);
        let wasted_bytes = total_bytes - compressed_bytes;
        let wasted_percent = if total_bytes == 0 {
            0.0
        } else {
            100.0 * wasted_bytes as f64 / total_bytes as f64
        };
        Self {
            total_bytes,
            compressed_bytes,
            wasted_bytes,
            wasted_percent,
        }
    }

    /// compressed / original; 1.0 for an empty resource.
    pub fn ratio(&self) -> f64 {
        if self.total_bytes == 0 {
            1.0
        } else {
            self.compressed_bytes as f64 / self.total_bytes as f64
        }
    }

    pub fn savings_string(&self) -> String {
        to_savings_string(self.wasted_bytes, self.wasted_percent)
    }
}

/// `"<kb> KB (~<percent>%)"`.
pub fn to_savings_string(bytes: u64, percent: f64) -> String {
    format!("{} (~{}%)", bytes_to_kb_string(bytes), percent.round())
}

pub fn bytes_to_kb_string(bytes: u64) -> String {
    format!("{} KB", (bytes as f64 / KB_IN_BYTES).round())
}

/// Transfer time saved at `throughput` bytes per second, rounded to whole ms.
/// `None` when the throughput is unknown or not positive.
pub fn wasted_ms(bytes: u64, throughput: Option<f64>) -> Option<f64> {
    throughput
        .filter(|t| t.is_finite() && *t > 0.0)
        .map(|t| (bytes as f64 / t * 1000.0).round())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Compression would keep more than the allowed share of the bytes.
    HighRatio { ratio: f64 },
    /// Absolute savings are under the byte floor.
    BelowMinimumBytes { wasted_bytes: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SavingsVerdict {
    Counted(ByteSavings),
    Ignored {
        savings: ByteSavings,
        reason: IgnoreReason,
    },
}

impl SavingsVerdict {
    pub fn is_counted(&self) -> bool {
        matches!(self, Self::Counted(_))
    }
}

/// One counted resource in a page summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRow {
    pub url: String,
    pub total_bytes: u64,
    pub wasted_bytes: u64,
    pub wasted_percent: f64,
    pub potential_savings: String,
}

/// Page-level aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSummary {
    pub rows: Vec<SavingsRow>,
    pub total_wasted_bytes: u64,
    pub ignored: usize,
    pub duplicates: usize,
    pub passes: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ByteSavingsEstimator {
    ignore_threshold_ratio: f64,
    ignore_threshold_bytes: u64,
    total_wasted_bytes_ceiling: u64,
    modeled_compression_ratio: f64,
}

impl ByteSavingsEstimator {
    pub fn new(thresholds: &CompressionThresholds) -> Self {
        Self {
            ignore_threshold_ratio: thresholds.ignore_threshold_ratio,
            ignore_threshold_bytes: thresholds.ignore_threshold_bytes,
            total_wasted_bytes_ceiling: thresholds.total_wasted_bytes_ceiling,
            modeled_compression_ratio: thresholds.modeled_compression_ratio,
        }
    }

    /// Modeled compressed size when none was observed.
    pub fn model_compressed_size(&self, original: u64) -> u64 {
        (original as f64 * self.modeled_compression_ratio).round() as u64
    }

    pub fn estimate(&self, original: u64, compressed: Option<u64>) -> ByteSavings {
        let compressed = compressed.unwrap_or_else(|| self.model_compressed_size(original));
        ByteSavings::new(original, compressed)
    }

    pub fn assess(&self, original: u64, compressed: Option<u64>) -> SavingsVerdict {
        let savings = self.estimate(original, compressed);
        let ratio = savings.ratio();
        if ratio > self.ignore_threshold_ratio {
            return SavingsVerdict::Ignored {
                savings,
                reason: IgnoreReason::HighRatio { ratio },
            };
        }
        if savings.wasted_bytes < self.ignore_threshold_bytes {
            return SavingsVerdict::Ignored {
                savings,
                reason: IgnoreReason::BelowMinimumBytes {
                    wasted_bytes: savings.wasted_bytes,
                },
            };
        }
        SavingsVerdict::Counted(savings)
    }

    pub fn within_ceiling(&self, total_wasted_bytes: u64) -> bool {
        total_wasted_bytes < self.total_wasted_bytes_ceiling
    }

    /// Aggregate `(url, original, compressed)` triples into a page summary.
    ///
    /// Only the first counted occurrence of a `(url, original)` pair counts.
    pub fn summarize<'a, I>(&self, resources: I) -> SavingsSummary
    where
        I: IntoIterator<Item = (&'a str, u64, Option<u64>)>,
    {
        let mut seen: HashSet<(&str, u64)> = HashSet::new();
        let mut rows = Vec::new();
        let mut total_wasted_bytes = 0u64;
        let mut ignored = 0usize;
        let mut duplicates = 0usize;

        for (url, original, compressed) in resources {
            let savings = match self.assess(original, compressed) {
                SavingsVerdict::Counted(s) => s,
                SavingsVerdict::Ignored { reason, .. } => {
                    tracing::trace!(url = %url, ?reason, "resource ignored");
                    ignored += 1;
                    continue;
                }
            };
            if !seen.insert((url, original)) {
                duplicates += 1;
                continue;
            }

            total_wasted_bytes += savings.wasted_bytes;
            rows.push(SavingsRow {
                url: url.to_string(),
                total_bytes: savings.total_bytes,
                wasted_bytes: savings.wasted_bytes,
                wasted_percent: savings.wasted_percent,
                potential_savings: savings.savings_string(),
            });
        }

        SavingsSummary {
            passes: self.within_ceiling(total_wasted_bytes),
            rows,
            total_wasted_bytes,
            ignored,
            duplicates,
        }
    }
}

impl Default for ByteSavingsEstimator {
    fn default() -> Self {
        Self::new(&CompressionThresholds::default())
    }
}
