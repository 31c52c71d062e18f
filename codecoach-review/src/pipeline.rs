//! The review pipeline: wiring and public handle
//!
//! [`ReviewPipeline::spawn`] builds the store, starts the dispatch runtime
//! on a tokio task, and returns a cheap handle exposing the intent entry
//! points plus a `watch` subscription to state snapshots. Capabilities are
//! injected per pipeline; there are no ambient singletons.

use std::path::PathBuf;
use std::sync::Arc;

use codecoach_dispatch::{EffectContext, LoggingMiddleware, Runtime, Store};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::action::Action;
use crate::analyzer::{Analyzer, MockAnalyzer};
use crate::effect::Effect;
use crate::reducer::reducer;
use crate::source::{BasicFormatter, Formatter, FsSourceReader, SourceReader};
use crate::state::{ResolutionPolicy, ReviewState};

/// The external collaborators a pipeline resolves intents with.
#[derive(Clone)]
pub struct Capabilities {
    pub analyzer: Arc<dyn Analyzer>,
    pub reader: Arc<dyn SourceReader>,
    pub formatter: Arc<dyn Formatter>,
}

impl Capabilities {
    /// The shipped stand-ins: canned analyzer, local filesystem reader,
    /// whitespace formatter.
    pub fn mocked() -> Self {
        Self {
            analyzer: Arc::new(MockAnalyzer::new()),
            reader: Arc::new(FsSourceReader),
            formatter: Arc::new(BasicFormatter),
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::mocked()
    }
}

/// Pipeline construction options.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineConfig {
    /// How concurrent resolutions are reconciled. Defaults to
    /// [`ResolutionPolicy::LastWriteWins`].
    pub policy: ResolutionPolicy,
}

/// Handle to a running review pipeline.
///
/// Cloneable and cheap; dropping it does not stop the pipeline - call
/// [`shutdown`](Self::shutdown) for that.
#[derive(Clone)]
pub struct ReviewPipeline {
    actions: mpsc::UnboundedSender<Action>,
    states: watch::Receiver<ReviewState>,
    cancel: CancellationToken,
}

impl ReviewPipeline {
    /// Start a pipeline on the current tokio runtime.
    ///
    /// Returns the handle and the join handle of the dispatch loop.
    pub fn spawn(capabilities: Capabilities, config: PipelineConfig) -> (Self, JoinHandle<()>) {
        let store = Store::new(ReviewState::new(config.policy), reducer)
            .with_middleware(LoggingMiddleware::new());
        let runtime = Runtime::from_store(store);

        let handle = Self {
            actions: runtime.action_tx(),
            states: runtime.watch_state(),
            cancel: runtime.cancel_token(),
        };

        let join = tokio::spawn(async move {
            runtime
                .run(move |effect, ctx| handle_effect(effect, ctx, &capabilities))
                .await;
        });

        (handle, join)
    }

    /// Submit source text for analysis.
    pub fn analyze_code(&self, source: impl Into<String>) {
        let _ = self.actions.send(Action::AnalyzeCode {
            source: source.into(),
        });
    }

    /// Read a file and feed its content through analysis.
    pub fn upload_file(&self, path: impl Into<PathBuf>) {
        let _ = self.actions.send(Action::UploadFile { path: path.into() });
    }

    /// Format the current code, then re-analyze it. A no-op when no code
    /// has been submitted yet.
    pub fn format_code(&self) {
        let _ = self.actions.send(Action::FormatCode);
    }

    /// Restore the initial empty state.
    pub fn reset(&self) {
        let _ = self.actions.send(Action::Reset);
    }

    /// Current state snapshot.
    pub fn state(&self) -> ReviewState {
        self.states.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn watch(&self) -> watch::Receiver<ReviewState> {
        self.states.clone()
    }

    /// Stop the dispatch loop and abort outstanding resolutions.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Turn effects into resolutions.
///
/// Resolutions are never replaced or cancelled once spawned; the store's
/// reconciliation policy alone decides which terminal transition sticks.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<'_, Action>, caps: &Capabilities) {
    match effect {
        Effect::RunAnalysis { seq, source } => {
            let analyzer = Arc::clone(&caps.analyzer);
            ctx.tasks().spawn(async move {
                match analyzer.analyze(source).await {
                    Ok(report) => Action::DidAnalyze { seq, report },
                    Err(error) => Action::DidFail { seq, error },
                }
            });
        }

        Effect::ReadSource { seq, path } => {
            tracing::debug!(path = %path.display(), "reading uploaded source");
            let reader = Arc::clone(&caps.reader);
            ctx.tasks().spawn(async move {
                match reader.read_text(path).await {
                    // Re-enter the pipeline with the file's content
                    Ok(source) => Action::AnalyzeCode { source },
                    Err(error) => Action::DidFail { seq, error },
                }
            });
        }

        Effect::FormatSource { seq, source } => {
            let formatter = Arc::clone(&caps.formatter);
            ctx.tasks().spawn(async move {
                match formatter.format(&source) {
                    // Re-enter with the formatted text
                    Ok(formatted) => Action::AnalyzeCode { source: formatted },
                    Err(error) => Action::DidFail { seq, error },
                }
            });
        }
    }
}
