//! `themed-omnibox`: the address bar can be themed from both the manifest and
//! a `<meta name="theme-color">` tag.

use super::{AuditCategory, AuditDefinition, AuditMeta};
use crate::artifacts::manifest_values::HAS_THEME_COLOR;
use crate::domain::{ArtifactName, AuditResult, MetaThemeColor};
use crate::manifest::is_valid_css_color;
use crate::runner::AuditRun;

pub const NO_META_TAG: &str = "No `<meta name=\"theme-color\">` tag found.";
pub const INVALID_META_COLOR: &str = "The theme-color meta tag did not contain a valid CSS color.";

pub const META: AuditMeta = AuditMeta {
    name: "themed-omnibox",
    category: AuditCategory::Pwa,
    description: "Address bar matches brand colors",
    help_text: "The browser address bar can be themed to match your site. A `theme-color` meta \
                tag upgrades the address bar while browsing, and the manifest theme_color \
                applies the same theme once the app is added to the homescreen.",
    required_artifacts: &[ArtifactName::Manifest, ArtifactName::ThemeColor],
};

pub fn definition() -> AuditDefinition {
    AuditDefinition {
        meta: META,
        evaluate,
    }
}

fn assess_manifest(run: &AuditRun, failures: &mut Vec<String>) {
    let report = match run.manifest_values() {
        Ok(report) => report,
        Err(err) => {
            failures.push(err.to_string());
            return;
        }
    };
    if let Some(reason) = &report.parse_failure_reason {
        failures.push(reason.clone());
        return;
    }
    if let Some(item) = report.item(HAS_THEME_COLOR).filter(|i| !i.passing) {
        failures.push(item.failure_text());
    }
}

fn assess_meta_theme_color(meta: Option<&MetaThemeColor>, failures: &mut Vec<String>) {
    match meta {
        None | Some(MetaThemeColor::Absent) => failures.push(NO_META_TAG.to_string()),
        Some(MetaThemeColor::Content(color)) if !is_valid_css_color(color.trim()) => {
            failures.push(INVALID_META_COLOR.to_string())
        }
        Some(MetaThemeColor::Content(_)) => {}
    }
}

fn evaluate(run: &AuditRun) -> AuditResult {
    let mut failures = Vec::new();
    assess_manifest(run, &mut failures);
    assess_meta_theme_color(run.artifacts().theme_color.as_ref(), &mut failures);
    AuditResult::from_failures(&failures)
}
