//! Performance trace events in Chrome trace-event format.

use serde::{Deserialize, Serialize};

/// Category carried by user-timing milestones (`navigationStart`, paints).
pub const USER_TIMING_CATEGORY: &str = "blink.user_timing";
/// Marker emitted once per traced page, naming the frame of record.
pub const TRACING_STARTED_IN_PAGE: &str = "TracingStartedInPage";
pub const NAVIGATION_START: &str = "navigationStart";
pub const FIRST_CONTENTFUL_PAINT: &str = "firstContentfulPaint";

/// A single trace event. Events arrive unordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Comma-separated category list.
    #[serde(default)]
    pub cat: String,
    pub name: String,
    /// Timestamp in microseconds.
    pub ts: u64,
    #[serde(default)]
    pub pid: u64,
    #[serde(default)]
    pub tid: u64,
    #[serde(default)]
    pub ph: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

impl TraceEvent {
    pub fn is_user_timing(&self) -> bool {
        self.cat.contains(USER_TIMING_CATEGORY)
    }

    pub fn is_tracing_started_in_page(&self) -> bool {
        self.name == TRACING_STARTED_IN_PAGE
    }

    /// Frame id of a user-timing event (`args.frame`).
    pub fn frame(&self) -> Option<&str> {
        self.args.get("frame").and_then(serde_json::Value::as_str)
    }

    /// Frame id announced by a `TracingStartedInPage` marker (`args.data.page`).
    pub fn started_page_frame(&self) -> Option<&str> {
        self.args
            .get("data")
            .and_then(|d| d.get("page"))
            .and_then(serde_json::Value::as_str)
    }
}

/// A captured trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub trace_events: Vec<TraceEvent>,
}
