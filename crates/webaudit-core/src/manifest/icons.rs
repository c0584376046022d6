//! Helpers over the manifest `icons` member.

use crate::domain::Manifest;

/// The manifest declares at least one icon.
pub fn icons_exist(manifest: &Manifest) -> bool {
    manifest.icons.value().is_some_and(|icons| !icons.is_empty())
}

/// Parse a `WxH` size token.
fn parse_size(token: &str) -> Option<(f64, f64)> {
    let (w, h) = token.split_once(|c: char| c == 'x' || c == 'X')?;
    let w: f64 = w.trim().parse().ok()?;
    let h: f64 = h.trim().parse().ok()?;
    (w.is_finite() && h.is_finite()).then_some((w, h))
}

/// Every declared size that is square and at least `min_px` on each side.
pub fn sizes_at_least(min_px: u32, manifest: &Manifest) -> Vec<String> {
    let Some(icons) = manifest.icons.value() else {
        return Vec::new();
    };
    let min = f64::from(min_px);
    icons
        .iter()
        .filter_map(|icon| icon.value())
        .filter_map(|icon| icon.sizes.value())
        .flatten()
        .filter(|size| {
            parse_size(size).is_some_and(|(w, h)| w >= min && h >= min && w == h)
        })
        .cloned()
        .collect()
}
