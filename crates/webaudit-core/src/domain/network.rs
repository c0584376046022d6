//! Network records as handed over by the gatherer.

use serde::{Deserialize, Serialize};

/// Resource type reported by the browser for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Document,
    Stylesheet,
    Script,
    Xhr,
    Fetch,
    EventSource,
    WebSocket,
    Manifest,
    TextTrack,
    Image,
    Media,
    Font,
    #[default]
    Other,
}

impl ResourceType {
    /// Whether responses of this type are text and benefit from compression.
    pub fn is_text_type(self) -> bool {
        matches!(
            self,
            Self::Document
                | Self::Stylesheet
                | Self::Script
                | Self::Xhr
                | Self::Fetch
                | Self::EventSource
                | Self::WebSocket
                | Self::Manifest
                | Self::TextTrack
        )
    }
}

/// A single response header, in the order the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub name: String,
    pub value: String,
}

impl ResponseHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One finished network request. Read-only to the audit core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub url: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub resource_type: ResourceType,
    /// Decoded body size in bytes.
    #[serde(default)]
    pub resource_size: u64,
    #[serde(default)]
    pub response_headers: Vec<ResponseHeader>,
    #[serde(default)]
    pub protocol: String,
}

impl NetworkRecord {
    /// Whether any `content-encoding` header names one of `encodings`.
    ///
    /// Header values may list several codings (`gzip, br`); each token is
    /// compared case-insensitively.
    pub fn is_content_encoded(&self, encodings: &[String]) -> bool {
        self.response_headers
            .iter()
            .filter(|h| h.name.eq_ignore_ascii_case("content-encoding"))
            .flat_map(|h| h.value.split(','))
            .map(str::trim)
            .any(|token| encodings.iter().any(|e| e.eq_ignore_ascii_case(token)))
    }
}
