//! Audit catalog.
//!
//! An audit is a metadata record plus a pure evaluation function over one
//! [`AuditRun`]. Audits never fail with an error: every problem ends up in the
//! returned [`AuditResult`].

pub mod first_contentful_paint;
pub mod installable;
pub mod response_compression;
pub mod short_name_length;
pub mod splash_screen;
pub mod themed_omnibox;

use serde::Serialize;

use crate::artifacts::ManifestCheckGroup;
use crate::domain::{ArtifactName, AuditResult};
use crate::runner::AuditRun;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCategory {
    Pwa,
    Performance,
}

/// Static description of an audit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMeta {
    pub name: &'static str,
    pub category: AuditCategory,
    pub description: &'static str,
    pub help_text: &'static str,
    /// Raw artifacts that must have been gathered before evaluation.
    pub required_artifacts: &'static [ArtifactName],
}

/// An audit: metadata plus its evaluation function.
#[derive(Debug, Clone, Copy)]
pub struct AuditDefinition {
    pub meta: AuditMeta,
    pub evaluate: fn(&AuditRun) -> AuditResult,
}

impl AuditDefinition {
    pub fn name(&self) -> &'static str {
        self.meta.name
    }
}

/// Every audit shipped with the crate.
pub fn default_audits() -> Vec<AuditDefinition> {
    vec![
        installable::definition(),
        splash_screen::definition(),
        themed_omnibox::definition(),
        short_name_length::definition(),
        response_compression::definition(),
        first_contentful_paint::definition(),
    ]
}

/// Failing manifest checklist texts for `groups`, plus the checklist itself
/// for `extended_info`. A cache failure becomes the single failure text.
pub(crate) fn manifest_failures(run: &AuditRun, groups: &[ManifestCheckGroup]) -> (Vec<String>, serde_json::Value) {
    match run.manifest_values() {
        Ok(report) => (
            report.failures_for(groups),
            serde_json::to_value(&*report).unwrap_or(serde_json::Value::Null),
        ),
        Err(err) => (vec![err.to_string()], serde_json::Value::Null),
    }
}
