//! Review state - single source of truth
//!
//! Subscribers receive snapshots of [`ReviewState`]; only the reducer
//! mutates it. `is_loading` is set by every accepted intent and cleared by
//! whichever terminal transition lands (`analysis` or `error`).

use std::path::PathBuf;

use crate::error::ReviewError;
use crate::report::AnalysisReport;

/// How terminal transitions from concurrent resolutions are reconciled.
///
/// Under `LastWriteWins` every in-flight resolution writes to the store,
/// so whichever completes last wins regardless of dispatch order.
/// `Sequenced` stamps each request with a monotonically increasing token
/// and drops terminal transitions whose token is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    #[default]
    LastWriteWins,
    Sequenced,
}

/// Everything the presentation layer needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewState {
    /// The source text most recently submitted for analysis.
    pub current_code: Option<String>,

    /// The file most recently uploaded.
    pub current_file: Option<PathBuf>,

    /// Result of the last completed analysis (None = never analyzed).
    pub analysis: Option<AnalysisReport>,

    /// Whether a resolution is in flight.
    pub is_loading: bool,

    /// Failure of the last resolution, if it failed.
    pub error: Option<ReviewError>,

    /// Token of the most recent request. Consulted only under
    /// [`ResolutionPolicy::Sequenced`].
    seq: u64,

    policy: ResolutionPolicy,
}

impl ReviewState {
    /// Create the initial empty state under the given policy.
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self {
            current_code: None,
            current_file: None,
            analysis: None,
            is_loading: false,
            error: None,
            seq: 0,
            policy,
        }
    }

    /// The reconciliation policy this state was created with.
    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// True once a resolution has completed and none is in flight.
    pub fn is_settled(&self) -> bool {
        !self.is_loading && (self.analysis.is_some() || self.error.is_some())
    }

    /// Apply the request transition: bump the token, raise the loading
    /// flag, clear any previous error. Returns the new token.
    pub(crate) fn begin_request(&mut self) -> u64 {
        self.seq += 1;
        self.is_loading = true;
        self.error = None;
        self.seq
    }

    /// Whether a terminal transition carrying `seq` should be discarded.
    pub(crate) fn is_stale(&self, seq: u64) -> bool {
        self.policy == ResolutionPolicy::Sequenced && seq != self.seq
    }
}

impl Default for ReviewState {
    fn default() -> Self {
        Self::new(ResolutionPolicy::default())
    }
}
