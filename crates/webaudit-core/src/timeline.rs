//! Page timeline reconstruction from an unordered trace.
//!
//! A browser trace can span several tabs and processes. [`reconstruct`] picks
//! the frame announced by the first `TracingStartedInPage` marker and derives
//! the milestones of that one page load:
//!
//! 1. key events (user-timing events plus the marker) are sorted by timestamp;
//! 2. the first marker fixes the frame of record;
//! 3. key events are narrowed to that frame;
//! 4. the first `firstContentfulPaint` is the paint anchor;
//! 5. the last `navigationStart` strictly before it is the navigation of record;
//! 6. the whole trace, narrowed to the marker's process, is kept in timestamp order.
//!
//! All sorts are stable, so events sharing a timestamp keep trace order.

use serde::Serialize;

use crate::domain::trace::{FIRST_CONTENTFUL_PAINT, NAVIGATION_START};
use crate::domain::{TimelineError, TraceEvent};

/// The milestones of one logical page load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTimeline {
    /// Every event of the page's renderer process, sorted by timestamp.
    pub frame_events: Vec<TraceEvent>,
    pub frame_start_event: TraceEvent,
    pub navigation_start_event: TraceEvent,
    pub first_contentful_paint_event: TraceEvent,
}

impl PageTimeline {
    /// Frame id of record.
    pub fn frame(&self) -> Option<&str> {
        frame_of_record(&self.frame_start_event)
    }

    /// Milliseconds from navigation start to `event`.
    pub fn offset_ms(&self, event: &TraceEvent) -> f64 {
        (event.ts as f64 - self.navigation_start_event.ts as f64) / 1000.0
    }

    pub fn first_contentful_paint_ms(&self) -> f64 {
        self.offset_ms(&self.first_contentful_paint_event)
    }
}

fn frame_of_record(marker: &TraceEvent) -> Option<&str> {
    marker.started_page_frame().or_else(|| marker.frame())
}

/// Reconstruct the timeline of the first traced page load.
pub fn reconstruct(trace_events: &[TraceEvent]) -> Result<PageTimeline, TimelineError> {
    let mut key_events: Vec<&TraceEvent> = trace_events
        .iter()
        .filter(|e| e.is_user_timing() || e.is_tracing_started_in_page())
        .collect();
    key_events.sort_by_key(|e| e.ts);

    let frame_start = key_events
        .iter()
        .copied()
        .find(|e| e.is_tracing_started_in_page())
        .ok_or(TimelineError::NoTracingStartedInPage)?;
    let frame = frame_of_record(frame_start).ok_or(TimelineError::MissingFrameId)?;

    let frame_key_events: Vec<&TraceEvent> = key_events
        .iter()
        .copied()
        .filter(|e| e.frame() == Some(frame))
        .collect();

    let first_paint = frame_key_events
        .iter()
        .copied()
        .find(|e| e.name == FIRST_CONTENTFUL_PAINT)
        .ok_or_else(|| TimelineError::NoFirstContentfulPaint {
            frame: frame.to_string(),
        })?;

    let navigation_start = frame_key_events
        .iter()
        .rev()
        .copied()
        .find(|e| e.name == NAVIGATION_START && e.ts < first_paint.ts)
        .ok_or_else(|| TimelineError::NoNavigationStart {
            frame: frame.to_string(),
        })?;

    let mut frame_events: Vec<TraceEvent> = trace_events
        .iter()
        .filter(|e| e.pid == frame_start.pid)
        .cloned()
        .collect();
    frame_events.sort_by_key(|e| e.ts);

    tracing::debug!(
        frame = %frame,
        pid = frame_start.pid,
        events = frame_events.len(),
        fcp_ts = first_paint.ts,
        nav_ts = navigation_start.ts,
        "page timeline reconstructed"
    );

    Ok(PageTimeline {
        frame_events,
        frame_start_event: frame_start.clone(),
        navigation_start_event: navigation_start.clone(),
        first_contentful_paint_event: first_paint.clone(),
    })
}
