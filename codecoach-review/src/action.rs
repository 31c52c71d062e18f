//! Actions: user intents plus terminal resolution results
//!
//! Naming convention: bare verbs are intents from the presentation layer,
//! `Did*` actions carry an async resolution's outcome back into the
//! reducer. `seq` on the `Did*` variants is the request token assigned by
//! the reducer when the originating intent was accepted.

use std::path::PathBuf;

use crate::error::ReviewError;
use crate::report::AnalysisReport;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Intent: submit source text for analysis.
    AnalyzeCode { source: String },

    /// Intent: read a file and feed its content through analysis.
    UploadFile { path: PathBuf },

    /// Intent: format the current code, then re-analyze it.
    FormatCode,

    /// Result: a resolution produced a report.
    DidAnalyze { seq: u64, report: AnalysisReport },

    /// Result: a resolution failed.
    DidFail { seq: u64, error: ReviewError },

    /// Restore the initial empty state (session teardown).
    Reset,
}

impl codecoach_dispatch::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::AnalyzeCode { .. } => "AnalyzeCode",
            Action::UploadFile { .. } => "UploadFile",
            Action::FormatCode => "FormatCode",
            Action::DidAnalyze { .. } => "DidAnalyze",
            Action::DidFail { .. } => "DidFail",
            Action::Reset => "Reset",
        }
    }
}
