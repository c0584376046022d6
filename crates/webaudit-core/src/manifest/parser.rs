//! Reference manifest parser.
//!
//! Turns manifest text into a [`ManifestNode`] tree. A failure anywhere is
//! recorded on the node it concerns; only unparseable JSON (or a non-object
//! root) fails the whole manifest.

use serde_json::{Map, Value};
use url::Url;

use super::color::is_valid_css_color;
use crate::domain::{Manifest, ManifestIcon, ManifestNode};

/// Display keywords the manifest format defines.
const DISPLAY_MODES: &[&str] = &["fullscreen", "standalone", "minimal-ui", "browser"];

/// Parse `raw` fetched from `manifest_url` for the page at `document_url`.
pub fn parse_manifest(raw: &str, manifest_url: &str, document_url: &str) -> ManifestNode<Manifest> {
    let json: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            return ManifestNode::invalid(
                Some(raw.to_string()),
                format!("ERROR: file isn't valid JSON: {e}"),
            )
        }
    };
    let Some(obj) = json.as_object() else {
        return ManifestNode::invalid(
            Some(raw.to_string()),
            "ERROR: manifest must be a JSON object.",
        );
    };

    let manifest_url = Url::parse(manifest_url).ok();
    let document_url = Url::parse(document_url).ok();

    let manifest = Manifest {
        name: parse_string(obj.get("name")),
        short_name: parse_string(obj.get("short_name")),
        start_url: parse_start_url(
            obj.get("start_url"),
            manifest_url.as_ref(),
            document_url.as_ref(),
        ),
        display: parse_display(obj.get("display")),
        theme_color: parse_color(obj.get("theme_color")),
        background_color: parse_color(obj.get("background_color")),
        icons: parse_icons(obj.get("icons"), manifest_url.as_ref()),
    };
    ManifestNode::valid(Some(raw.to_string()), manifest)
}

fn raw_of(v: &Value) -> Option<String> {
    Some(v.to_string())
}

fn parse_string(v: Option<&Value>) -> ManifestNode<String> {
    match v {
        None => ManifestNode::missing(),
        Some(v) => match v.as_str() {
            Some(s) => ManifestNode::valid(raw_of(v), s.trim().to_string()),
            None => ManifestNode::invalid(raw_of(v), "ERROR: expected a string."),
        },
    }
}

fn parse_start_url(
    v: Option<&Value>,
    manifest_url: Option<&Url>,
    document_url: Option<&Url>,
) -> ManifestNode<String> {
    let node = parse_string(v);
    let Some(value) = node.value.as_deref() else {
        return node;
    };
    if value.is_empty() {
        return ManifestNode::invalid(node.raw, "ERROR: start_url string empty.");
    }
    let Some(resolved) = manifest_url.and_then(|base| base.join(value).ok()) else {
        return ManifestNode::invalid(
            node.raw,
            "ERROR: invalid start_url relative to manifest URL.",
        );
    };
    if let Some(document) = document_url {
        if resolved.origin() != document.origin() {
            return ManifestNode::invalid(
                node.raw,
                "ERROR: start_url must be same-origin as document.",
            );
        }
    }
    ManifestNode::valid(node.raw, resolved.to_string())
}

fn parse_display(v: Option<&Value>) -> ManifestNode<String> {
    let node = parse_string(v);
    let Some(value) = node.value.as_deref() else {
        return node;
    };
    let mode = value.to_ascii_lowercase();
    if DISPLAY_MODES.contains(&mode.as_str()) {
        ManifestNode::valid(node.raw, mode)
    } else {
        ManifestNode::invalid(
            node.raw,
            format!("ERROR: 'display' has invalid value {value:?}."),
        )
    }
}

fn parse_color(v: Option<&Value>) -> ManifestNode<String> {
    let node = parse_string(v);
    let Some(value) = node.value.as_deref() else {
        return node;
    };
    if is_valid_css_color(value) {
        node
    } else {
        ManifestNode::invalid(node.raw, format!("ERROR: color parsing failed for {value:?}."))
    }
}

fn parse_icons(
    v: Option<&Value>,
    manifest_url: Option<&Url>,
) -> ManifestNode<Vec<ManifestNode<ManifestIcon>>> {
    let Some(v) = v else {
        return ManifestNode::missing();
    };
    match v {
        Value::Array(items) => {
            let icons = items
                .iter()
                .map(|item| match item.as_object() {
                    Some(obj) => ManifestNode::valid(raw_of(item), parse_icon(obj, manifest_url)),
                    None => ManifestNode::invalid(raw_of(item), "ERROR: icon must be an object."),
                })
                .collect();
            ManifestNode::valid(raw_of(v), icons)
        }
        other => ManifestNode::invalid(
            raw_of(other),
            "ERROR: 'icons' expected to be an array.",
        ),
    }
}

fn parse_icon(obj: &Map<String, Value>, manifest_url: Option<&Url>) -> ManifestIcon {
    let src = {
        let node = parse_string(obj.get("src"));
        match node.value.as_deref() {
            None => node,
            Some("") => ManifestNode::invalid(node.raw, "ERROR: icon src string empty."),
            Some(value) => match manifest_url.and_then(|base| base.join(value).ok()) {
                Some(url) => ManifestNode::valid(node.raw, url.to_string()),
                None => ManifestNode::invalid(node.raw, "ERROR: invalid icon src."),
            },
        }
    };

    let sizes = {
        let node = parse_string(obj.get("sizes"));
        match node.value.as_deref() {
            None => ManifestNode {
                raw: node.raw,
                value: None,
                debug_string: node.debug_string,
            },
            Some(value) => ManifestNode::valid(
                node.raw,
                value
                    .split_whitespace()
                    .map(str::to_ascii_lowercase)
                    .collect(),
            ),
        }
    };

    let density = match obj.get("density") {
        None => ManifestNode::valid(None, 1.0),
        Some(v) => match v.as_f64() {
            Some(d) if d > 0.0 => ManifestNode::valid(raw_of(v), d),
            _ => ManifestNode::invalid(
                raw_of(v),
                "ERROR: icon density must be a positive number.",
            ),
        },
    };

    ManifestIcon {
        src,
        sizes,
        icon_type: parse_string(obj.get("type")),
        density,
    }
}
