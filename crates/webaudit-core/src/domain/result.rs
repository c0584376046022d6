//! The uniform result every audit returns.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Boolean verdict or numeric measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Numeric(f64),
}

/// Outcome of one audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub raw_value: RawValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_info: Option<serde_json::Value>,
}

impl AuditResult {
    pub fn pass() -> Self {
        Self {
            raw_value: RawValue::Bool(true),
            debug_string: None,
            display_value: None,
            extended_info: None,
        }
    }

    pub fn fail(debug_string: impl Into<String>) -> Self {
        Self {
            raw_value: RawValue::Bool(false),
            debug_string: Some(debug_string.into()),
            display_value: None,
            extended_info: None,
        }
    }

    pub fn numeric(value: f64) -> Self {
        Self {
            raw_value: RawValue::Numeric(value),
            debug_string: None,
            display_value: None,
            extended_info: None,
        }
    }

    /// Pass when `failures` is empty, otherwise fail listing every one.
    pub fn from_failures(failures: &[String]) -> Self {
        if failures.is_empty() {
            return Self::pass();
        }
        let joined = failures.join(", ");
        if joined.ends_with('.') {
            Self::fail(format!("Unsatisfied requirements: {joined}"))
        } else {
            Self::fail(format!("Unsatisfied requirements: {joined}."))
        }
    }

    pub fn with_display_value(mut self, display_value: impl Into<String>) -> Self {
        self.display_value = Some(display_value.into());
        self
    }

    pub fn with_extended_info(mut self, info: serde_json::Value) -> Self {
        self.extended_info = Some(info);
        self
    }

    /// `false` for a failed boolean audit; numeric audits always count as passed.
    pub fn passed(&self) -> bool {
        match self.raw_value {
            RawValue::Bool(b) => b,
            RawValue::Numeric(_) => self.debug_string.is_none(),
        }
    }
}

/// All audit results of one run, keyed by audit name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub audits: BTreeMap<String, AuditResult>,
}

impl AuditRunReport {
    pub fn get(&self, audit: &str) -> Option<&AuditResult> {
        self.audits.get(audit)
    }

    pub fn failed(&self) -> Vec<&str> {
        self.audits
            .iter()
            .filter(|(_, r)| !r.passed())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
