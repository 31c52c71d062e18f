//! Effects: async work the reducer requests
//!
//! An effect is a description, not the work itself. The pipeline's effect
//! handler turns each one into a task that eventually feeds a new action
//! back into the loop. Re-entrant flows (upload/format feeding a fresh
//! `AnalyzeCode` intent) happen there, never inside the reducer.

use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Run the analyze capability against the given source.
    RunAnalysis { seq: u64, source: String },

    /// Read a file's text content, then re-enter as `AnalyzeCode`.
    ReadSource { seq: u64, path: PathBuf },

    /// Format the given source, then re-enter as `AnalyzeCode`.
    FormatSource { seq: u64, source: String },
}
