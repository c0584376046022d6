//! Web app manifest model.
//!
//! Every field is wrapped in a [`ManifestNode`], which records the raw input,
//! the parsed value (if any) and a diagnostic when parsing rejected it. Absence
//! and invalidity are data, never faults.

use serde::{Deserialize, Serialize};

use super::error::FieldDefect;

/// A parsed-with-possible-defect value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestNode<T> {
    /// Raw JSON text of the field as it appeared in the manifest.
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub value: Option<T>,
    #[serde(default)]
    pub debug_string: Option<String>,
}

impl<T> Default for ManifestNode<T> {
    fn default() -> Self {
        Self::missing()
    }
}

impl<T> ManifestNode<T> {
    /// A field that parsed cleanly.
    pub fn valid(raw: Option<String>, value: T) -> Self {
        Self {
            raw,
            value: Some(value),
            debug_string: None,
        }
    }

    /// A field that does not appear in the manifest.
    pub fn missing() -> Self {
        Self {
            raw: None,
            value: None,
            debug_string: None,
        }
    }

    /// A field that is present but was rejected.
    pub fn invalid(raw: Option<String>, reason: impl Into<String>) -> Self {
        Self {
            raw,
            value: None,
            debug_string: Some(reason.into()),
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// The value, or why there is none.
    pub fn get(&self) -> Result<&T, FieldDefect> {
        match (&self.value, &self.debug_string) {
            (Some(v), _) => Ok(v),
            (None, Some(reason)) => Err(FieldDefect::Invalid {
                reason: reason.clone(),
            }),
            (None, None) => Err(FieldDefect::Missing),
        }
    }
}

impl ManifestNode<String> {
    /// Present and non-empty.
    pub fn has_text(&self) -> bool {
        self.value.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// One entry of the manifest `icons` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestIcon {
    #[serde(default)]
    pub src: ManifestNode<String>,
    /// Space-separated `WxH` tokens, already split and lower-cased.
    #[serde(default)]
    pub sizes: ManifestNode<Vec<String>>,
    #[serde(default, rename = "type")]
    pub icon_type: ManifestNode<String>,
    #[serde(default)]
    pub density: ManifestNode<f64>,
}

/// The manifest members the audits inspect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: ManifestNode<String>,
    #[serde(default)]
    pub short_name: ManifestNode<String>,
    #[serde(default)]
    pub start_url: ManifestNode<String>,
    #[serde(default)]
    pub display: ManifestNode<String>,
    #[serde(default)]
    pub theme_color: ManifestNode<String>,
    #[serde(default)]
    pub background_color: ManifestNode<String>,
    #[serde(default)]
    pub icons: ManifestNode<Vec<ManifestNode<ManifestIcon>>>,
}

/// What the gatherer found when it looked for a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "manifest", rename_all = "snake_case")]
pub enum PageManifest {
    /// The page does not link a manifest.
    Absent,
    /// A manifest was fetched; it may still have failed to parse.
    Fetched(ManifestNode<Manifest>),
}

impl PageManifest {
    pub fn node(&self) -> Option<&ManifestNode<Manifest>> {
        match self {
            Self::Absent => None,
            Self::Fetched(node) => Some(node),
        }
    }

    /// The parsed manifest, when one exists and parsed.
    pub fn manifest(&self) -> Option<&Manifest> {
        self.node().and_then(ManifestNode::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_reports_missing_and_invalid() {
        let missing: ManifestNode<String> = ManifestNode::missing();
        assert_eq!(missing.get(), Err(FieldDefect::Missing));

        let invalid: ManifestNode<String> =
            ManifestNode::invalid(Some("42".to_string()), "ERROR: expected a string.");
        assert!(matches!(invalid.get(), Err(FieldDefect::Invalid { .. })));

        let valid = ManifestNode::valid(Some("\"app\"".to_string()), "app".to_string());
        assert_eq!(valid.get(), Ok(&"app".to_string()));
    }

    #[test]
    fn empty_string_has_no_text() {
        let empty = ManifestNode::valid(Some("\"\"".to_string()), String::new());
        assert!(empty.is_present());
        assert!(!empty.has_text());
    }

    #[test]
    fn page_manifest_accessors() {
        assert!(PageManifest::Absent.node().is_none());
        let unparsed = PageManifest::Fetched(ManifestNode::invalid(
            Some("{:,}".to_string()),
            "ERROR: file isn't valid JSON",
        ));
        assert!(unparsed.node().is_some());
        assert!(unparsed.manifest().is_none());
    }
}
