use webaudit_core::audits::short_name_length::NO_SHORT_NAME;
use webaudit_core::audits::themed_omnibox::{INVALID_META_COLOR, NO_META_TAG};
use webaudit_core::{AuditConfig, AuditRunReport, AuditRunner, GatheredArtifacts, MetaThemeColor};

const DOC: &str = "https://example.com/";
const MANIFEST_URL: &str = "https://example.com/manifest.json";

const SPLASH_READY: &str = r##"{
  "name": "Example Progressive App",
  "short_name": "Example",
  "start_url": "/",
  "display": "fullscreen",
  "theme_color": "rgb(49, 126, 251)",
  "background_color": "white",
  "icons": [{"src": "/icon-512.png", "sizes": "512x512"}]
}"##;

fn run(manifest: &str, meta: Option<MetaThemeColor>) -> AuditRunReport {
    run_with(AuditConfig::default(), manifest, meta)
}

fn run_with(config: AuditConfig, manifest: &str, meta: Option<MetaThemeColor>) -> AuditRunReport {
    let artifacts = GatheredArtifacts {
        theme_color: meta,
        ..Default::default()
    }
    .with_manifest_source(manifest, MANIFEST_URL, DOC);
    AuditRunner::new(config).run(artifacts)
}

fn debug_of<'a>(report: &'a AuditRunReport, audit: &str) -> Option<&'a str> {
    report.get(audit).and_then(|r| r.debug_string.as_deref())
}

// ---- splash-screen ----

#[test]
fn splash_ready_manifest_passes() {
    let report = run(SPLASH_READY, None);
    assert!(report.get("splash-screen").unwrap().passed());
}

#[test]
fn splash_lists_only_splash_failures() {
    let report = run(r##"{"name": "App", "display": "browser", "theme_color": "#abc"}"##, None);
    assert_eq!(
        debug_of(&report, "splash-screen"),
        Some(
            "Unsatisfied requirements: Manifest contains icons at least 192px, \
             Manifest's `display` property is one of: fullscreen, standalone, minimal-ui, \
             Manifest contains a valid `background_color`."
        )
    );
}

#[test]
fn browser_display_accepted_when_configured() {
    let mut config = AuditConfig::default();
    config.manifest.pwa_display_modes.push("browser".to_string());
    let manifest = SPLASH_READY.replace("fullscreen", "browser");
    let report = run_with(config, &manifest, None);
    assert!(report.get("splash-screen").unwrap().passed());
}

// ---- themed-omnibox ----

#[test]
fn omnibox_needs_manifest_and_meta_colors() {
    let report = run(SPLASH_READY, Some(MetaThemeColor::Content("#317efb".to_string())));
    assert!(report.get("themed-omnibox").unwrap().passed());
}

#[test]
fn omnibox_reports_both_sources_independently() {
    let report = run(r#"{"theme_color": "blurple"}"#, Some(MetaThemeColor::Absent));
    assert_eq!(
        debug_of(&report, "themed-omnibox"),
        Some(
            format!(
                "Unsatisfied requirements: Manifest contains a valid `theme_color` \
                 (ERROR: color parsing failed for \"blurple\".), {NO_META_TAG}"
            )
            .as_str()
        )
    );

    let report = run(SPLASH_READY, Some(MetaThemeColor::Content("rgb(1,2)".to_string())));
    assert_eq!(
        debug_of(&report, "themed-omnibox"),
        Some(format!("Unsatisfied requirements: {INVALID_META_COLOR}").as_str())
    );
}

#[test]
fn omnibox_tells_missing_and_invalid_theme_color_apart() {
    let meta = || Some(MetaThemeColor::Content("#317efb".to_string()));
    let missing = run(r#"{"start_url": "/"}"#, meta());
    let invalid = run(r#"{"start_url": "/", "theme_color": "no"}"#, meta());

    assert_eq!(
        debug_of(&missing, "themed-omnibox"),
        Some("Unsatisfied requirements: Manifest contains a valid `theme_color`.")
    );
    assert_eq!(
        debug_of(&invalid, "themed-omnibox"),
        Some(
            "Unsatisfied requirements: Manifest contains a valid `theme_color` \
             (ERROR: color parsing failed for \"no\".)."
        )
    );
    assert_ne!(
        debug_of(&missing, "themed-omnibox"),
        debug_of(&invalid, "themed-omnibox")
    );
}

#[test]
fn omnibox_surfaces_parse_failure_reason() {
    let report = run("{\"theme_color\": ", Some(MetaThemeColor::Content("red".to_string())));
    let debug = debug_of(&report, "themed-omnibox").unwrap();
    assert!(
        debug.starts_with("Unsatisfied requirements: Manifest is parsed as valid JSON: ERROR: file isn't valid JSON"),
        "{debug}"
    );
}

#[test]
fn omnibox_requires_theme_color_gatherer() {
    let report = run(SPLASH_READY, None);
    assert_eq!(
        debug_of(&report, "themed-omnibox"),
        Some("Required ThemeColor gatherer did not run.")
    );
}

// ---- manifest-short-name-length ----

#[test]
fn short_name_length_cases() {
    let report = run(SPLASH_READY, None);
    assert!(report.get("manifest-short-name-length").unwrap().passed());

    let report = run(r#"{"name": "App"}"#, None);
    assert_eq!(debug_of(&report, "manifest-short-name-length"), Some(NO_SHORT_NAME));

    let report = run(r#"{"short_name": "Example Progressive"}"#, None);
    assert_eq!(
        debug_of(&report, "manifest-short-name-length"),
        Some("short_name \"Example Progressive\" is 19 characters long and will be truncated to 12.")
    );
}
