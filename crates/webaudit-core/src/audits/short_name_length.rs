//! `manifest-short-name-length`: the homescreen label will not be truncated.

use super::{AuditCategory, AuditDefinition, AuditMeta};
use crate::artifacts::manifest_values::{HAS_SHORT_NAME, SHORT_NAME_LENGTH};
use crate::domain::{ArtifactName, AuditResult};
use crate::runner::AuditRun;

pub const NO_SHORT_NAME: &str = "No short_name found in manifest.";

pub const META: AuditMeta = AuditMeta {
    name: "manifest-short-name-length",
    category: AuditCategory::Pwa,
    description: "Manifest's short_name won't be truncated when displayed on homescreen",
    help_text: "Make your app's short_name fewer than the configured number of characters \
                to ensure that it's not truncated on homescreens.",
    required_artifacts: &[ArtifactName::Manifest],
};

pub fn definition() -> AuditDefinition {
    AuditDefinition {
        meta: META,
        evaluate,
    }
}

fn evaluate(run: &AuditRun) -> AuditResult {
    let report = match run.manifest_values() {
        Ok(report) => report,
        Err(err) => return AuditResult::fail(err.to_string()),
    };
    if let Some(reason) = &report.parse_failure_reason {
        return AuditResult::fail(reason.clone());
    }
    if report.passing(HAS_SHORT_NAME) != Some(true) {
        return AuditResult::fail(NO_SHORT_NAME);
    }
    if report.passing(SHORT_NAME_LENGTH) == Some(true) {
        return AuditResult::pass();
    }

    let max = run.config().manifest.max_short_name_length;
    let short_name = run
        .artifacts()
        .manifest
        .as_ref()
        .and_then(|m| m.manifest())
        .and_then(|m| m.short_name.value())
        .map(String::as_str)
        .unwrap_or_default();
    AuditResult::fail(format!(
        "short_name \"{short_name}\" is {} characters long and will be truncated to {max}.",
        short_name.chars().count()
    ))
}
