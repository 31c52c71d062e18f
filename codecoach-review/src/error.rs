//! Error taxonomy for the review pipeline
//!
//! Every resolution failure is recovered at the pipeline boundary and lands
//! in [`ReviewState::error`](crate::state::ReviewState) as a `ReviewError`.
//! The variant is the machine-readable discriminant; `Display` is the
//! human-readable message the presentation layer renders. Nothing here is
//! fatal - the user retries by issuing a new intent.

use thiserror::Error;

/// A failed resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// The analyze capability rejected the source or failed internally.
    #[error("analysis failed: {0}")]
    Analysis(String),

    /// The file could not be read or decoded as text.
    #[error("could not read source: {0}")]
    Read(String),

    /// The formatting transform failed.
    #[error("formatting failed: {0}")]
    Format(String),
}

/// Failure discriminant, for callers that branch on the kind of failure
/// rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Analysis,
    Read,
    Format,
}

impl ReviewError {
    /// The discriminant for this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            ReviewError::Analysis(_) => FailureKind::Analysis,
            ReviewError::Read(_) => FailureKind::Read,
            ReviewError::Format(_) => FailureKind::Format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            ReviewError::Analysis("backend down".into()).kind(),
            FailureKind::Analysis
        );
        assert_eq!(
            ReviewError::Read("not utf-8".into()).kind(),
            FailureKind::Read
        );
        assert_eq!(
            ReviewError::Format("binary data".into()).kind(),
            FailureKind::Format
        );
    }

    #[test]
    fn test_message_is_non_empty() {
        let err = ReviewError::Read("missing file".into());
        assert!(!err.to_string().is_empty());
        assert!(err.to_string().contains("missing file"));
    }
}
