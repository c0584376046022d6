//! `webapp-install-banner`: the page meets the install prompt criteria.

use serde_json::json;
use url::Url;

use super::{manifest_failures, AuditCategory, AuditDefinition, AuditMeta};
use crate::artifacts::ManifestCheckGroup;
use crate::domain::{ArtifactName, AuditResult, GatheredArtifacts, ServiceWorkerStatus};
use crate::runner::AuditRun;

pub const SERVICE_WORKER_REQUIREMENT: &str = "Site registers a Service Worker.";

pub const META: AuditMeta = AuditMeta {
    name: "webapp-install-banner",
    category: AuditCategory::Pwa,
    description: "User can be prompted to Install the Web App",
    help_text: "Browsers can proactively prompt users to add your app to their homescreen, \
                which can lead to higher engagement. The page needs a valid manifest with \
                start_url, icons, short_name and name, plus an activated service worker.",
    required_artifacts: &[
        ArtifactName::Url,
        ArtifactName::Manifest,
        ArtifactName::ServiceWorker,
    ],
};

pub fn definition() -> AuditDefinition {
    AuditDefinition {
        meta: META,
        evaluate,
    }
}

/// An activated service worker whose script shares the final page URL's origin.
pub fn has_matching_service_worker(artifacts: &GatheredArtifacts) -> bool {
    let (Some(url), Some(workers)) = (&artifacts.url, &artifacts.service_worker) else {
        return false;
    };
    let Ok(page) = Url::parse(&url.final_url) else {
        return false;
    };
    let origin = page.origin();
    workers.versions.iter().any(|v| {
        v.status == ServiceWorkerStatus::Activated
            && Url::parse(&v.script_url).is_ok_and(|script| script.origin() == origin)
    })
}

fn evaluate(run: &AuditRun) -> AuditResult {
    let (mut failures, manifest_values) =
        manifest_failures(run, &[ManifestCheckGroup::Installability]);

    if !has_matching_service_worker(run.artifacts()) {
        failures.push(SERVICE_WORKER_REQUIREMENT.to_string());
    }

    AuditResult::from_failures(&failures).with_extended_info(json!({
        "manifestValues": manifest_values,
        "failures": failures,
    }))
}
