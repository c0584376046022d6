//! Error taxonomy for artifact computation, configuration and audit runs.
//!
//! Audit-level failures never escape as errors: they are folded into an
//! [`AuditResult`](crate::domain::AuditResult) debug string. The enums here are
//! what artifacts and the runner use internally before that folding happens.

/// Why a [`PageTimeline`](crate::timeline::PageTimeline) could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    #[error("no TracingStartedInPage event found in trace")]
    NoTracingStartedInPage,

    #[error("TracingStartedInPage event does not carry a frame id")]
    MissingFrameId,

    #[error("no firstContentfulPaint event found for frame {frame}")]
    NoFirstContentfulPaint { frame: String },

    #[error("no navigationStart event precedes firstContentfulPaint for frame {frame}")]
    NoNavigationStart { frame: String },
}

/// Errors produced while computing a derived artifact.
///
/// `Clone` because the artifact cache stores failures and hands the same
/// error to every later caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArtifactError {
    #[error("{artifact}: missing prerequisite: {reason}")]
    MissingPrerequisite { artifact: String, reason: String },

    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error("artifact {name} was cached with a different output type")]
    TypeMismatch { name: String },
}

/// Errors raised while loading an [`AuditConfig`](crate::config::AuditConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },
}

/// Why a manifest field has no usable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldDefect {
    #[error("field is missing")]
    Missing,

    #[error("field is invalid: {reason}")]
    Invalid { reason: String },
}

/// Top-level errors for an audit run.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("audit task {audit} failed: {reason}")]
    TaskFailed { audit: String, reason: String },
}

/// Result type for webaudit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_error_names_frame() {
        let err = TimelineError::NoFirstContentfulPaint {
            frame: "0xabc".to_string(),
        };
        assert!(err.to_string().contains("0xabc"));
        assert!(err.to_string().contains("firstContentfulPaint"));
    }

    #[test]
    fn artifact_error_wraps_timeline_transparently() {
        let err: ArtifactError = TimelineError::NoTracingStartedInPage.into();
        assert_eq!(
            err.to_string(),
            "no TracingStartedInPage event found in trace"
        );
    }

    #[test]
    fn missing_prerequisite_display() {
        let err = ArtifactError::MissingPrerequisite {
            artifact: "PageTimeline".to_string(),
            reason: "trace was not gathered".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("PageTimeline"));
        assert!(msg.contains("missing prerequisite"));
    }

    #[test]
    fn field_defect_distinguishes_missing_from_invalid() {
        assert_eq!(FieldDefect::Missing.to_string(), "field is missing");
        let invalid = FieldDefect::Invalid {
            reason: "expected a string".to_string(),
        };
        assert!(invalid.to_string().contains("expected a string"));
    }
}
