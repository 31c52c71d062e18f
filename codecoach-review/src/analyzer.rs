//! The analyze capability
//!
//! The pipeline depends only on the [`Analyzer`] trait; swapping the mock
//! for a real backend touches nothing in the reducer or the pipeline
//! wiring. [`MockAnalyzer`] is the bounded-latency stand-in shipped until
//! that backend exists: it sleeps for a fixed duration, then returns one of
//! two canned reports depending on whether the source mentions a known
//! algorithm.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::ReviewError;
use crate::report::{AnalysisReport, Issue, IssueKind, Priority, Suggestion, SuggestionKind};

/// Boxed future returned by [`Analyzer::analyze`], dyn-safe and spawnable.
pub type AnalyzeFuture = Pin<Box<dyn Future<Output = Result<AnalysisReport, ReviewError>> + Send>>;

/// Abstract analysis capability, potentially remote.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, source: String) -> AnalyzeFuture;
}

/// Algorithm keywords that select the specialized canned report.
pub const KNOWN_ALGORITHMS: &[&str] = &["fibonacci", "quicksort", "binary_search", "dijkstra"];

/// Canned analyzer with simulated latency.
#[derive(Debug, Clone, Copy)]
pub struct MockAnalyzer {
    latency: Duration,
}

impl MockAnalyzer {
    /// Default simulated round-trip latency.
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1200);

    pub fn new() -> Self {
        Self {
            latency: Self::DEFAULT_LATENCY,
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for MockAnalyzer {
    fn analyze(&self, source: String) -> AnalyzeFuture {
        let latency = self.latency;
        Box::pin(async move {
            tokio::time::sleep(latency).await;
            Ok(canned_report(&source))
        })
    }
}

/// Pick the canned report for a source snippet.
fn canned_report(source: &str) -> AnalysisReport {
    match KNOWN_ALGORITHMS.iter().find(|kw| source.contains(*kw)) {
        Some(algorithm) => specialized_report(algorithm),
        None => default_report(),
    }
}

fn specialized_report(algorithm: &str) -> AnalysisReport {
    AnalysisReport {
        issues: vec![
            Issue {
                kind: IssueKind::Performance,
                message: format!("recursive {algorithm} recomputes overlapping subproblems"),
                line: 1,
            },
            Issue {
                kind: IssueKind::Style,
                message: "missing docstring on the main entry point".into(),
                line: 1,
            },
        ],
        score: 85,
        suggestions: vec![
            Suggestion {
                kind: SuggestionKind::Refactor,
                text: format!("memoize or convert {algorithm} to an iterative form"),
                priority: Priority::High,
            },
            Suggestion {
                kind: SuggestionKind::Testing,
                text: "add unit tests covering the base cases".into(),
                priority: Priority::Medium,
            },
        ],
    }
}

fn default_report() -> AnalysisReport {
    AnalysisReport {
        issues: vec![
            Issue {
                kind: IssueKind::Style,
                message: "inconsistent spacing around operators".into(),
                line: 1,
            },
            Issue {
                kind: IssueKind::Maintainability,
                message: "top-level statements make the snippet hard to reuse".into(),
                line: 1,
            },
        ],
        score: 75,
        suggestions: vec![
            Suggestion {
                kind: SuggestionKind::Testing,
                text: "wrap the snippet in a function so it can be tested".into(),
                priority: Priority::Medium,
            },
            Suggestion {
                kind: SuggestionKind::Documentation,
                text: "describe the intent with a short comment".into(),
                priority: Priority::Low,
            },
        ],
    }
}
