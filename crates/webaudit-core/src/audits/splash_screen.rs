//! `splash-screen`: the manifest carries what a custom splash screen needs.

use serde_json::json;

use super::{manifest_failures, AuditCategory, AuditDefinition, AuditMeta};
use crate::artifacts::ManifestCheckGroup;
use crate::domain::{ArtifactName, AuditResult};
use crate::runner::AuditRun;

pub const META: AuditMeta = AuditMeta {
    name: "splash-screen",
    category: AuditCategory::Pwa,
    description: "Configured for a custom splash screen",
    help_text: "A default splash screen will be constructed, but meeting these requirements \
                guarantees a high-quality splash screen between tapping the home screen icon \
                and the app's first paint.",
    required_artifacts: &[ArtifactName::Manifest],
};

pub fn definition() -> AuditDefinition {
    AuditDefinition {
        meta: META,
        evaluate,
    }
}

fn evaluate(run: &AuditRun) -> AuditResult {
    let (failures, manifest_values) = manifest_failures(run, &[ManifestCheckGroup::Splash]);
    AuditResult::from_failures(&failures).with_extended_info(json!({
        "manifestValues": manifest_values,
        "failures": failures,
    }))
}
