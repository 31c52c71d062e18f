//! Analysis report types
//!
//! The report is the payload of a successful resolution. It is serde-ready
//! so a real analysis backend (or the demo's JSON output) can produce and
//! consume it without another representation in between.

use serde::{Deserialize, Serialize};

/// Outcome of analyzing a piece of source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Findings, in the order the analyzer produced them.
    pub issues: Vec<Issue>,
    /// Overall quality score, 0-100.
    pub score: u8,
    /// Recommended follow-ups, in priority order.
    pub suggestions: Vec<Suggestion>,
}

/// A single finding tied to a location in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    /// 1-based line number.
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Correctness,
    Performance,
    Style,
    Maintainability,
}

/// A recommended change that is not tied to a specific line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub text: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Refactor,
    Documentation,
    Testing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}
