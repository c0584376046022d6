//! `first-contentful-paint`: time from navigation start to first contentful paint.

use serde_json::json;

use super::{AuditCategory, AuditDefinition, AuditMeta};
use crate::domain::{ArtifactName, AuditResult};
use crate::runner::AuditRun;

pub const META: AuditMeta = AuditMeta {
    name: "first-contentful-paint",
    category: AuditCategory::Performance,
    description: "First Contentful Paint",
    help_text: "First contentful paint marks the time at which the first text or image is \
                painted.",
    required_artifacts: &[ArtifactName::Trace],
};

pub fn definition() -> AuditDefinition {
    AuditDefinition {
        meta: META,
        evaluate,
    }
}

fn evaluate(run: &AuditRun) -> AuditResult {
    let timeline = match run.page_timeline() {
        Ok(timeline) => timeline,
        Err(err) => return AuditResult::fail(err.to_string()),
    };
    let fcp_ms = timeline.first_contentful_paint_ms();
    AuditResult::numeric(fcp_ms)
        .with_display_value(format!("{} ms", fcp_ms.round()))
        .with_extended_info(json!({
            "frame": timeline.frame(),
            "timestamps": {
                "navigationStart": timeline.navigation_start_event.ts,
                "firstContentfulPaint": timeline.first_contentful_paint_event.ts,
            },
        }))
}
