//! `ManifestValues` artifact: the manifest checklist, evaluated once per run
//! and sliced by group by the installability, splash-screen, omnibox and
//! homescreen audits.

use serde::{Deserialize, Serialize};

use super::ComputedArtifact;
use crate::checklist::{ChecklistItem, ChecklistReport, ChecklistResult, RuleChecklist};
use crate::config::ManifestRules;
use crate::domain::{ArtifactError, FieldDefect, Manifest, ManifestNode, PageManifest};
use crate::manifest::{icons_exist, is_valid_css_color, sizes_at_least};

pub const HAS_MANIFEST: &str = "has_manifest";
pub const HAS_PARSEABLE_MANIFEST: &str = "has_parseable_manifest";
pub const HAS_START_URL: &str = "has_start_url";
pub const HAS_ICONS_AT_LEAST_144PX: &str = "has_icons_at_least_144px";
pub const HAS_ICONS_AT_LEAST_192PX: &str = "has_icons_at_least_192px";
pub const HAS_PWA_DISPLAY_VALUE: &str = "has_pwa_display_value";
pub const HAS_BACKGROUND_COLOR: &str = "has_background_color";
pub const HAS_THEME_COLOR: &str = "has_theme_color";
pub const HAS_SHORT_NAME: &str = "has_short_name";
pub const SHORT_NAME_LENGTH: &str = "short_name_length";
pub const HAS_NAME: &str = "has_name";

/// Which audits an item feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestCheckGroup {
    Validity,
    Installability,
    Splash,
    Omnibox,
    Homescreen,
}

type ManifestChecklist = RuleChecklist<PageManifest, ManifestCheckGroup>;

/// Run `check` against the parsed manifest; `false` when there is none.
fn on_manifest<F>(check: F) -> impl Fn(&PageManifest) -> bool + Send + Sync + 'static
where
    F: Fn(&Manifest) -> bool + Send + Sync + 'static,
{
    move |page: &PageManifest| page.manifest().is_some_and(&check)
}

/// Explain a failed check from the parsed manifest; nothing when there is none.
fn explain_on_manifest<F>(
    explain: F,
) -> impl Fn(&PageManifest) -> Option<String> + Send + Sync + 'static
where
    F: Fn(&Manifest) -> Option<String> + Send + Sync + 'static,
{
    move |page: &PageManifest| page.manifest().and_then(&explain)
}

/// The parser's reason for rejecting a present field. A missing field has
/// none, so its item reports the bare requirement.
fn rejection<T>(node: &ManifestNode<T>) -> Option<String> {
    match node.get() {
        Err(FieldDefect::Invalid { reason }) => Some(reason),
        Ok(_) | Err(FieldDefect::Missing) => None,
    }
}

fn valid_color(node: &ManifestNode<String>) -> bool {
    node.value().is_some_and(|c| is_valid_css_color(c))
}

fn color_rejection(node: &ManifestNode<String>) -> Option<String> {
    match node.get() {
        Ok(color) if !is_valid_css_color(color) => {
            Some(format!("{color:?} is not a valid CSS color"))
        }
        _ => rejection(node),
    }
}

/// Build the manifest checklist for `rules`.
pub fn manifest_checklist(rules: &ManifestRules) -> ManifestChecklist {
    use ManifestCheckGroup::*;

    let install_px = rules.install_icon_min_px;
    let splash_px = rules.splash_icon_min_px;
    let display_modes = rules.pwa_display_modes.clone();
    let max_short_name = rules.max_short_name_length;

    RuleChecklist::new()
        .with_item(ChecklistItem::prerequisite(
            HAS_MANIFEST,
            "Manifest is available",
            vec![Validity],
            |page: &PageManifest| page.node().is_some(),
        ))
        .with_item(ChecklistItem::prerequisite(
            HAS_PARSEABLE_MANIFEST,
            "Manifest is parsed as valid JSON",
            vec![Validity],
            |page: &PageManifest| page.manifest().is_some(),
        ))
        .with_item(ChecklistItem::check(
            HAS_START_URL,
            "Manifest contains `start_url`",
            vec![Installability],
            on_manifest(|m| m.start_url.has_text()),
        )
        .with_detail(explain_on_manifest(|m| rejection(&m.start_url))))
        .with_item(ChecklistItem::check(
            HAS_ICONS_AT_LEAST_144PX,
            format!("Manifest contains icons at least {install_px}px"),
            vec![Installability],
            on_manifest(move |m| icons_exist(m) && !sizes_at_least(install_px, m).is_empty()),
        )
        .with_detail(explain_on_manifest(|m| rejection(&m.icons))))
        .with_item(ChecklistItem::check(
            HAS_ICONS_AT_LEAST_192PX,
            format!("Manifest contains icons at least {splash_px}px"),
            vec![Splash],
            on_manifest(move |m| icons_exist(m) && !sizes_at_least(splash_px, m).is_empty()),
        )
        .with_detail(explain_on_manifest(|m| rejection(&m.icons))))
        .with_item(ChecklistItem::check(
            HAS_PWA_DISPLAY_VALUE,
            format!(
                "Manifest's `display` property is one of: {}",
                display_modes.join(", ")
            ),
            vec![Splash],
            on_manifest(move |m| {
                m.display
                    .value()
                    .is_some_and(|d| display_modes.iter().any(|mode| mode.eq_ignore_ascii_case(d)))
            }),
        )
        .with_detail(explain_on_manifest(|m| rejection(&m.display))))
        .with_item(ChecklistItem::check(
            HAS_BACKGROUND_COLOR,
            "Manifest contains a valid `background_color`",
            vec![Splash],
            on_manifest(|m| valid_color(&m.background_color)),
        )
        .with_detail(explain_on_manifest(|m| color_rejection(&m.background_color))))
        .with_item(ChecklistItem::check(
            HAS_THEME_COLOR,
            "Manifest contains a valid `theme_color`",
            vec![Splash, Omnibox],
            on_manifest(|m| valid_color(&m.theme_color)),
        )
        .with_detail(explain_on_manifest(|m| color_rejection(&m.theme_color))))
        .with_item(ChecklistItem::check(
            HAS_SHORT_NAME,
            "Manifest contains `short_name`",
            vec![Installability, Homescreen],
            on_manifest(|m| m.short_name.has_text()),
        )
        .with_detail(explain_on_manifest(|m| rejection(&m.short_name))))
        .with_item(ChecklistItem::check(
            SHORT_NAME_LENGTH,
            format!("Manifest `short_name` is at most {max_short_name} characters"),
            vec![Homescreen],
            on_manifest(move |m| {
                m.short_name
                    .value()
                    .is_some_and(|s| !s.is_empty() && s.chars().count() <= max_short_name)
            }),
        ))
        .with_item(ChecklistItem::check(
            HAS_NAME,
            "Manifest contains `name`",
            vec![Installability, Splash],
            on_manifest(|m| m.name.has_text()),
        )
        .with_detail(explain_on_manifest(|m| rejection(&m.name))))
}

/// The evaluated manifest checklist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestReport {
    pub checklist: ChecklistReport<ManifestCheckGroup>,
    pub is_parse_failure: bool,
    /// Text of the failed prerequisite, with the parser diagnostic appended
    /// when there is one.
    pub parse_failure_reason: Option<String>,
}

impl ManifestReport {
    pub fn item(&self, id: &str) -> Option<&ChecklistResult<ManifestCheckGroup>> {
        self.checklist.get(id)
    }

    /// `Some(passing)` if the item was evaluated.
    pub fn passing(&self, id: &str) -> Option<bool> {
        self.checklist.passing(id)
    }

    /// Failure texts for `groups`, validity failures included. An item whose
    /// field was present but rejected carries the rejection reason.
    pub fn failures_for(&self, groups: &[ManifestCheckGroup]) -> Vec<String> {
        let mut scope = vec![ManifestCheckGroup::Validity];
        scope.extend_from_slice(groups);
        self.checklist.failure_texts(&scope)
    }
}

/// Computes a [`ManifestReport`] from the gathered manifest.
#[derive(Debug, Clone)]
pub struct ManifestValues {
    checklist: ManifestChecklist,
}

impl ManifestValues {
    pub fn new(rules: &ManifestRules) -> Self {
        Self {
            checklist: manifest_checklist(rules),
        }
    }

    pub fn checklist(&self) -> &ManifestChecklist {
        &self.checklist
    }

    pub fn evaluate(&self, page: &PageManifest) -> ManifestReport {
        let checklist = self.checklist.evaluate(page);
        let parse_failure_reason = checklist.failed_prerequisite().map(|item| {
            match page.node().and_then(|n| n.debug_string.as_deref()) {
                Some(diagnostic) => format!("{}: {}", item.user_text, diagnostic),
                None => item.user_text.clone(),
            }
        });
        ManifestReport {
            is_parse_failure: parse_failure_reason.is_some(),
            parse_failure_reason,
            checklist,
        }
    }
}

impl Default for ManifestValues {
    fn default() -> Self {
        Self::new(&ManifestRules::default())
    }
}

impl ComputedArtifact for ManifestValues {
    const NAME: &'static str = "ManifestValues";

    type Input = PageManifest;
    type Output = ManifestReport;

    fn compute(&self, page: &PageManifest) -> Result<ManifestReport, ArtifactError> {
        Ok(self.evaluate(page))
    }
}
