//! codecoach-review: the code-review intent pipeline
//!
//! Client-side core for the codecoach review feature. The presentation
//! layer submits intents (analyze, upload, format) through a
//! [`ReviewPipeline`] handle; resolutions run asynchronously against
//! injected capabilities, and every transition lands in a [`ReviewState`]
//! snapshot published over a `watch` channel.
//!
//! Control flow:
//!
//! ```text
//! intent -> reducer (request transition, effect)
//!        -> effect handler (spawn resolution)
//!        -> Did* action (terminal transition)
//!        -> state snapshot to subscribers
//! ```
//!
//! # Example
//!
//! ```ignore
//! use codecoach_review::{Capabilities, PipelineConfig, ReviewPipeline};
//!
//! let (pipeline, _join) = ReviewPipeline::spawn(
//!     Capabilities::mocked(),
//!     PipelineConfig::default(),
//! );
//! let mut states = pipeline.watch();
//!
//! pipeline.analyze_code("def fibonacci(n): ...");
//! let settled = states.wait_for(|s| s.is_settled()).await?;
//! println!("score: {}", settled.analysis.as_ref().unwrap().score);
//! ```

pub mod action;
pub mod analyzer;
pub mod effect;
pub mod error;
pub mod pipeline;
pub mod reducer;
pub mod report;
pub mod source;
pub mod state;

pub use action::Action;
pub use analyzer::{Analyzer, AnalyzeFuture, MockAnalyzer, KNOWN_ALGORITHMS};
pub use effect::Effect;
pub use error::{FailureKind, ReviewError};
pub use pipeline::{Capabilities, PipelineConfig, ReviewPipeline};
pub use reducer::reducer;
pub use report::{AnalysisReport, Issue, IssueKind, Priority, Suggestion, SuggestionKind};
pub use source::{BasicFormatter, Formatter, FsSourceReader, ReadFuture, SourceReader};
pub use state::{ResolutionPolicy, ReviewState};
