//! Tunable thresholds shared by the audits.
//!
//! Defaults mirror the values the audits were calibrated with. A config can be
//! loaded from TOML and then overridden through `WEBAUDIT_*` environment
//! variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ConfigError;

/// Compression gating constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionThresholds {
    /// Candidates whose compressed/original ratio exceeds this are ignored.
    pub ignore_threshold_ratio: f64,
    /// Candidates saving fewer bytes than this are ignored.
    pub ignore_threshold_bytes: u64,
    /// A page passes while total wasted bytes stay below this.
    pub total_wasted_bytes_ceiling: u64,
    /// `content-encoding` tokens treated as already compressed.
    pub compressed_encodings: Vec<String>,
    /// Modeled compressed/original ratio when no compressed size was observed.
    pub modeled_compression_ratio: f64,
    /// Responses smaller than this never become candidates.
    pub min_candidate_bytes: u64,
}

impl Default for CompressionThresholds {
    fn default() -> Self {
        Self {
            ignore_threshold_ratio: 0.9,
            ignore_threshold_bytes: 1400,
            total_wasted_bytes_ceiling: 100 * 1024,
            compressed_encodings: vec!["gzip".to_string(), "br".to_string(), "deflate".to_string()],
            modeled_compression_ratio: 2.0 / 3.0,
            min_candidate_bytes: 1,
        }
    }
}

/// Manifest checklist constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestRules {
    pub max_short_name_length: usize,
    /// Accepted `display` values for an app-like experience.
    pub pwa_display_modes: Vec<String>,
    pub install_icon_min_px: u32,
    pub splash_icon_min_px: u32,
}

impl Default for ManifestRules {
    fn default() -> Self {
        Self {
            max_short_name_length: 12,
            pwa_display_modes: vec![
                "fullscreen".to_string(),
                "standalone".to_string(),
                "minimal-ui".to_string(),
            ],
            install_icon_min_px: 144,
            splash_icon_min_px: 192,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub compression: CompressionThresholds,
    pub manifest: ManifestRules,
}

impl AuditConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("WEBAUDIT_IGNORE_THRESHOLD_BYTES") {
            self.compression.ignore_threshold_bytes =
                parse_env("WEBAUDIT_IGNORE_THRESHOLD_BYTES", &v)?;
        }
        if let Some(v) = lookup("WEBAUDIT_IGNORE_THRESHOLD_RATIO") {
            self.compression.ignore_threshold_ratio =
                parse_env("WEBAUDIT_IGNORE_THRESHOLD_RATIO", &v)?;
        }
        if let Some(v) = lookup("WEBAUDIT_TOTAL_WASTED_BYTES_CEILING") {
            self.compression.total_wasted_bytes_ceiling =
                parse_env("WEBAUDIT_TOTAL_WASTED_BYTES_CEILING", &v)?;
        }
        if let Some(v) = lookup("WEBAUDIT_MAX_SHORT_NAME_LENGTH") {
            self.manifest.max_short_name_length =
                parse_env("WEBAUDIT_MAX_SHORT_NAME_LENGTH", &v)?;
        }
        if let Some(v) = lookup("WEBAUDIT_PWA_DISPLAY_MODES") {
            let modes: Vec<String> = v
                .split(',')
                .map(|m| m.trim().to_ascii_lowercase())
                .filter(|m| !m.is_empty())
                .collect();
            if modes.is_empty() {
                return Err(ConfigError::InvalidEnv {
                    var: "WEBAUDIT_PWA_DISPLAY_MODES".to_string(),
                    value: v,
                });
            }
            self.manifest.pwa_display_modes = modes;
        }
        Ok(self)
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}
