use std::sync::Arc;

use serde_json::json;
use webaudit_core::{
    AuditConfig, AuditRunner, ComputedArtifact, GatheredArtifacts, ManifestValues,
    MetaThemeColor, PageTimelineArtifact, RawValue, ResponseCompression,
};

const MANIFEST: &str = r##"{
  "name": "Example Progressive App",
  "short_name": "Example",
  "start_url": "/",
  "display": "standalone",
  "theme_color": "#317efb",
  "background_color": "#ffffff",
  "icons": [{"src": "/icon-512.png", "sizes": "512x512"}]
}"##;

fn full_snapshot() -> GatheredArtifacts {
    let artifacts: GatheredArtifacts = serde_json::from_value(json!({
        "url": {"initialUrl": "http://example.com", "finalUrl": "https://example.com/"},
        "serviceWorker": {"versions": [
            {"status": "activated", "scriptURL": "https://example.com/sw.js"}
        ]},
        "themeColor": {"status": "content", "content": "#317efb"},
        "networkThroughput": 1_000_000.0,
        "networkRecords": [
            {"url": "https://example.com/", "mimeType": "text/html",
             "resourceType": "document", "resourceSize": 12000,
             "responseHeaders": [{"name": "Content-Encoding", "value": "gzip"}]},
            {"url": "https://example.com/app.js", "mimeType": "application/javascript",
             "resourceType": "script", "resourceSize": 30000}
        ],
        "trace": {"traceEvents": [
            {"cat": "blink.user_timing", "name": "firstContentfulPaint",
             "ts": 1_250_000, "pid": 9, "tid": 1, "ph": "R", "args": {"frame": "0xa"}},
            {"cat": "disabled-by-default-devtools.timeline", "name": "TracingStartedInPage",
             "ts": 999_000, "pid": 9, "tid": 1, "ph": "I", "args": {"data": {"page": "0xa"}}},
            {"cat": "blink.user_timing", "name": "navigationStart",
             "ts": 1_000_000, "pid": 9, "tid": 1, "ph": "R", "args": {"frame": "0xa"}}
        ]}
    }))
    .unwrap();
    artifacts.with_manifest_source(MANIFEST, "https://example.com/manifest.json", "https://example.com/")
}

// ---- sequential ----

#[test]
fn full_snapshot_passes_every_audit() {
    let report = AuditRunner::default().run(full_snapshot());
    assert_eq!(report.audits.len(), 6);
    assert!(report.failed().is_empty(), "failed: {:?}", report.failed());

    let fcp = report.get("first-contentful-paint").unwrap();
    assert_eq!(fcp.raw_value, RawValue::Numeric(250.0));
    assert_eq!(fcp.display_value.as_deref(), Some("250 ms"));

    let compression = report.get("uses-request-compression").unwrap();
    assert_eq!(compression.raw_value, RawValue::Bool(true));
    assert_eq!(
        compression.display_value.as_deref(),
        Some("Potential savings of 10 KB (~10 ms)")
    );
}

#[test]
fn every_shared_artifact_is_computed_once() {
    let runner = AuditRunner::default();
    let run = runner.start(full_snapshot());
    runner.evaluate(&run);

    // four audits read ManifestValues; one computation each for three artifacts
    assert_eq!(run.cache().computations(), 3);
    for name in [ManifestValues::NAME, PageTimelineArtifact::NAME, ResponseCompression::NAME] {
        assert!(run.cache().contains(name), "{name} not computed");
    }
}

#[test]
fn report_serializes_for_renderer() {
    let report = AuditRunner::default().run(full_snapshot());
    let value = serde_json::to_value(&report).unwrap();
    assert!(value["runId"].is_string());
    assert!(value["generatedAt"].is_string());
    assert_eq!(value["audits"]["splash-screen"]["rawValue"], true);
    assert!(value["audits"]["splash-screen"].get("debugString").is_none());
}

#[test]
fn custom_audit_list_and_config() {
    let config = AuditConfig::from_toml_str("[compression]\ntotal_wasted_bytes_ceiling = 1000\n").unwrap();
    let audits = webaudit_core::default_audits()
        .into_iter()
        .filter(|a| a.meta.name == "uses-request-compression")
        .collect();
    let report = AuditRunner::with_audits(config, audits).run(full_snapshot());
    assert_eq!(report.audits.len(), 1);
    assert_eq!(report.failed(), vec!["uses-request-compression"]);
}

// ---- concurrent ----

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_run_matches_sequential() {
    let runner = AuditRunner::default();
    let sequential = runner.run(full_snapshot());
    let concurrent = runner.run_concurrent(full_snapshot()).await.unwrap();

    assert_eq!(sequential.audits, concurrent.audits);
    assert_ne!(sequential.run_id, concurrent.run_id);
}

#[tokio::test]
async fn concurrent_audits_share_one_cache() {
    let runner = AuditRunner::default();
    let run = Arc::new(runner.start(full_snapshot()));
    let report = runner.evaluate_concurrent(Arc::clone(&run)).await.unwrap();

    assert_eq!(report.run_id, run.id());
    assert_eq!(report.audits.len(), 6);
    assert_eq!(run.cache().computations(), 3);
}

#[tokio::test]
async fn concurrent_run_reports_missing_gatherers() {
    let mut artifacts = full_snapshot();
    artifacts.trace = None;
    artifacts.theme_color = Some(MetaThemeColor::Absent);

    let report = AuditRunner::default().run_concurrent(artifacts).await.unwrap();
    assert_eq!(
        report.get("first-contentful-paint").and_then(|r| r.debug_string.as_deref()),
        Some("Required traces gatherer did not run.")
    );
    assert!(!report.get("themed-omnibox").unwrap().passed());
    assert!(report.get("splash-screen").unwrap().passed());
}
