//! Reducer - pure function: (state, action) -> state + effects
//!
//! All state transitions happen here, synchronously, before any async work
//! is scheduled. Intents apply the request transition (loading up, error
//! cleared) and emit the effect that resolves them; `Did*` actions apply
//! the terminal transition. No I/O in this module.

use codecoach_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::ReviewState;

pub fn reducer(state: &mut ReviewState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::AnalyzeCode { source } => {
            let seq = state.begin_request();
            state.current_code = Some(source.clone());
            DispatchResult::changed_with(Effect::RunAnalysis { seq, source })
        }

        Action::UploadFile { path } => {
            let seq = state.begin_request();
            state.current_file = Some(path.clone());
            DispatchResult::changed_with(Effect::ReadSource { seq, path })
        }

        Action::FormatCode => match state.current_code.clone() {
            Some(source) => {
                let seq = state.begin_request();
                DispatchResult::changed_with(Effect::FormatSource { seq, source })
            }
            // Nothing to format: no transition at all, callers must not
            // assume FormatCode always yields a visible update.
            None => DispatchResult::unchanged(),
        },

        Action::DidAnalyze { seq, report } => {
            if state.is_stale(seq) {
                return DispatchResult::unchanged();
            }
            state.analysis = Some(report);
            state.is_loading = false;
            state.error = None;
            DispatchResult::changed()
        }

        Action::DidFail { seq, error } => {
            if state.is_stale(seq) {
                return DispatchResult::unchanged();
            }
            // Failure clears loading but leaves the last analysis intact.
            state.is_loading = false;
            state.error = Some(error);
            DispatchResult::changed()
        }

        Action::Reset => {
            *state = ReviewState::new(state.policy());
            DispatchResult::changed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;
    use crate::report::AnalysisReport;
    use crate::state::ResolutionPolicy;
    use std::path::PathBuf;

    fn sample_report(score: u8) -> AnalysisReport {
        AnalysisReport {
            issues: vec![],
            score,
            suggestions: vec![],
        }
    }

    #[test]
    fn test_analyze_applies_request_transition_synchronously() {
        let mut state = ReviewState::default();
        state.error = Some(ReviewError::Analysis("old".into()));

        let result = reducer(
            &mut state,
            Action::AnalyzeCode {
                source: "x = 1".into(),
            },
        );

        assert!(result.changed);
        assert!(state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.current_code.as_deref(), Some("x = 1"));
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::RunAnalysis { seq: 1, source }] if source == "x = 1"
        ));
    }

    #[test]
    fn test_upload_stores_file_and_requests_read() {
        let mut state = ReviewState::default();
        let path = PathBuf::from("/tmp/solution.py");

        let result = reducer(&mut state, Action::UploadFile { path: path.clone() });

        assert!(result.changed);
        assert!(state.is_loading);
        assert_eq!(state.current_file, Some(path.clone()));
        assert_eq!(result.effects, vec![Effect::ReadSource { seq: 1, path }]);
    }

    #[test]
    fn test_did_analyze_settles_success() {
        let mut state = ReviewState::default();
        reducer(
            &mut state,
            Action::AnalyzeCode {
                source: "x = 1".into(),
            },
        );

        let result = reducer(
            &mut state,
            Action::DidAnalyze {
                seq: 1,
                report: sample_report(75),
            },
        );

        assert!(result.changed);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.analysis, Some(sample_report(75)));
        assert!(state.is_settled());
    }

    #[test]
    fn test_did_fail_keeps_previous_analysis() {
        let mut state = ReviewState::default();
        state.analysis = Some(sample_report(85));
        reducer(
            &mut state,
            Action::AnalyzeCode {
                source: "y = 2".into(),
            },
        );

        let result = reducer(
            &mut state,
            Action::DidFail {
                seq: 1,
                error: ReviewError::Analysis("backend down".into()),
            },
        );

        assert!(result.changed);
        assert!(!state.is_loading);
        assert_eq!(state.analysis, Some(sample_report(85)));
        assert_eq!(
            state.error,
            Some(ReviewError::Analysis("backend down".into()))
        );
    }

    #[test]
    fn test_format_without_code_is_no_transition() {
        let mut state = ReviewState::default();
        let before = state.clone();

        let result = reducer(&mut state, Action::FormatCode);

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_format_with_code_requests_formatting() {
        let mut state = ReviewState::default();
        state.current_code = Some("x=1".into());

        let result = reducer(&mut state, Action::FormatCode);

        assert!(result.changed);
        assert!(state.is_loading);
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::FormatSource { source, .. }] if source == "x=1"
        ));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = ReviewState::default();
        reducer(
            &mut state,
            Action::AnalyzeCode {
                source: "x = 1".into(),
            },
        );
        reducer(
            &mut state,
            Action::DidAnalyze {
                seq: 1,
                report: sample_report(75),
            },
        );

        reducer(&mut state, Action::Reset);
        let once = state.clone();
        reducer(&mut state, Action::Reset);

        assert_eq!(state, once);
        assert_eq!(state, ReviewState::default());
    }

    #[test]
    fn test_sequenced_policy_drops_stale_resolution() {
        let mut state = ReviewState::new(ResolutionPolicy::Sequenced);
        reducer(
            &mut state,
            Action::AnalyzeCode {
                source: "def fibonacci(n): ...".into(),
            },
        );
        reducer(
            &mut state,
            Action::AnalyzeCode {
                source: "x = 1".into(),
            },
        );

        // seq 1 finished after seq 2 was issued: stale, dropped
        let result = reducer(
            &mut state,
            Action::DidAnalyze {
                seq: 1,
                report: sample_report(85),
            },
        );
        assert!(!result.changed);
        assert!(state.analysis.is_none());
        assert!(state.is_loading);

        // the current request still lands
        let result = reducer(
            &mut state,
            Action::DidAnalyze {
                seq: 2,
                report: sample_report(75),
            },
        );
        assert!(result.changed);
        assert_eq!(state.analysis, Some(sample_report(75)));
    }

    #[test]
    fn test_last_write_wins_applies_out_of_order_resolution() {
        let mut state = ReviewState::default();
        reducer(
            &mut state,
            Action::AnalyzeCode {
                source: "def fibonacci(n): ...".into(),
            },
        );
        reducer(
            &mut state,
            Action::AnalyzeCode {
                source: "x = 1".into(),
            },
        );

        reducer(
            &mut state,
            Action::DidAnalyze {
                seq: 2,
                report: sample_report(75),
            },
        );
        // under last-write-wins the late seq-1 result overwrites
        let result = reducer(
            &mut state,
            Action::DidAnalyze {
                seq: 1,
                report: sample_report(85),
            },
        );

        assert!(result.changed);
        assert_eq!(state.analysis, Some(sample_report(85)));
    }
}
