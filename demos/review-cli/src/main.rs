//! review-cli - codecoach pipeline demo
//!
//! Uploads a file through the review pipeline, optionally formats it, and
//! prints the analysis report as JSON. The analysis itself is the canned
//! mock; the point is the pipeline: upload -> read -> analyze -> settle.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p review-cli -- solution.py
//! cargo run -p review-cli -- --format --latency-ms 100 solution.py
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use codecoach_review::{
    Capabilities, MockAnalyzer, PipelineConfig, ResolutionPolicy, ReviewPipeline, ReviewState,
};
use tokio::sync::watch;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

/// Review a source file through the codecoach pipeline
#[derive(Parser, Debug)]
#[command(name = "review-cli")]
#[command(about = "Run a source file through the codecoach review pipeline")]
struct Args {
    /// Source file to review
    file: PathBuf,

    /// Format the source and re-analyze after the first pass
    #[arg(long)]
    format: bool,

    /// Simulated analyzer latency in milliseconds
    #[arg(long, default_value = "400")]
    latency_ms: u64,

    /// Discard stale resolutions instead of last-write-wins
    #[arg(long)]
    sequenced: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let capabilities = Capabilities {
        analyzer: Arc::new(MockAnalyzer::with_latency(Duration::from_millis(
            args.latency_ms,
        ))),
        ..Capabilities::mocked()
    };
    let config = PipelineConfig {
        policy: if args.sequenced {
            ResolutionPolicy::Sequenced
        } else {
            ResolutionPolicy::LastWriteWins
        },
    };

    let (pipeline, join) = ReviewPipeline::spawn(capabilities, config);
    let mut states = pipeline.watch();

    pipeline.upload_file(&args.file);
    let Some(settled) = settle(&mut states).await else {
        eprintln!("error: the pipeline did not settle");
        return ExitCode::FAILURE;
    };

    let settled = if args.format && settled.error.is_none() {
        pipeline.format_code();
        // Wait for one snapshot past the first settle, then for the
        // re-entered analysis to settle. The loading snapshot itself may be
        // conflated away under low latency; the final settled one never is.
        let reformatted = async {
            states.changed().await.ok()?;
            states.wait_for(|s| s.is_settled()).await.ok().map(|s| s.clone())
        };
        match timeout(Duration::from_secs(10), reformatted).await {
            Ok(Some(state)) => state,
            _ => {
                eprintln!("error: formatting pass did not settle");
                return ExitCode::FAILURE;
            }
        }
    } else {
        settled
    };

    let code = report(&settled);

    pipeline.shutdown();
    let _ = join.await;
    code
}

async fn settle(states: &mut watch::Receiver<ReviewState>) -> Option<ReviewState> {
    timeout(Duration::from_secs(10), states.wait_for(|s| s.is_settled()))
        .await
        .ok()?
        .ok()
        .map(|s| s.clone())
}

fn report(state: &ReviewState) -> ExitCode {
    if let Some(error) = &state.error {
        eprintln!("review failed: {error}");
        return ExitCode::FAILURE;
    }

    match &state.analysis {
        Some(report) => match serde_json::to_string_pretty(report) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: could not serialize report: {e}");
                ExitCode::FAILURE
            }
        },
        None => {
            eprintln!("error: pipeline settled without a report");
            ExitCode::FAILURE
        }
    }
}
