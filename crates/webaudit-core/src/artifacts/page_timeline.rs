//! `PageTimeline` artifact: the trace-of-tab view shared by timing audits.

use super::ComputedArtifact;
use crate::domain::{ArtifactError, Trace};
use crate::timeline::{reconstruct, PageTimeline};

#[derive(Debug, Clone, Copy, Default)]
pub struct PageTimelineArtifact;

impl ComputedArtifact for PageTimelineArtifact {
    const NAME: &'static str = "PageTimeline";

    type Input = Trace;
    type Output = PageTimeline;

    fn compute(&self, trace: &Trace) -> Result<PageTimeline, ArtifactError> {
        Ok(reconstruct(&trace.trace_events)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimelineError;

    #[test]
    fn empty_trace_fails_with_timeline_error() {
        let err = PageTimelineArtifact.compute(&Trace::default()).unwrap_err();
        assert_eq!(
            err,
            ArtifactError::Timeline(TimelineError::NoTracingStartedInPage)
        );
    }
}
