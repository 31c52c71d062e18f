//! Task set for async resolutions
//!
//! Each in-flight resolution is a tokio task whose future produces the
//! terminal action (success or failure); the action is sent back to the
//! runtime's channel on completion. Resolutions are independent: spawning
//! never replaces or de-duplicates an earlier one, and nothing short of
//! [`TaskSet::abort_all`] (runtime teardown) stops a resolution once it has
//! started. Which terminal transition sticks is the reducer's decision, not
//! the task set's.
//!
//! # Example
//!
//! ```ignore
//! use codecoach_dispatch::tasks::TaskSet;
//!
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskSet::new(action_tx);
//!
//! tasks.spawn(async {
//!     let report = analyzer.analyze(source).await;
//!     Action::DidAnalyze(report)
//! });
//!
//! // Abort everything on shutdown
//! tasks.abort_all();
//! ```

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::Action;

/// Set of in-flight resolution tasks.
///
/// Holds an abort handle per spawned task so outstanding work can be torn
/// down in one call. Handles of finished tasks are reaped on the next
/// spawn, keeping the set bounded by the number of live resolutions.
///
/// # Type Parameters
///
/// - `A`: The action type that tasks produce
pub struct TaskSet<A> {
    handles: Vec<AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> TaskSet<A>
where
    A: Action,
{
    /// Create a new task set.
    ///
    /// The `action_tx` channel is used to send actions back to the runtime
    /// loop when tasks complete.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            handles: Vec::new(),
            action_tx,
        }
    }

    /// Spawn a resolution task.
    ///
    /// The future's output action is sent to the action channel when the
    /// task completes. Earlier tasks keep running: completion order decides
    /// arrival order, not spawn order. If the task is aborted first, no
    /// action is sent.
    ///
    /// # Example
    ///
    /// ```ignore
    /// tasks.spawn(async move {
    ///     match reader.read_text(path).await {
    ///         Ok(text) => Action::AnalyzeCode { source: text },
    ///         Err(e) => Action::DidFail { seq, error: e },
    ///     }
    /// });
    /// ```
    pub fn spawn<F>(&mut self, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.handles.retain(|handle| !handle.is_finished());

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = future.await;
            let _ = tx.send(action);
        });

        self.handles.push(handle.abort_handle());
        self
    }

    /// Abort all in-flight tasks.
    ///
    /// Used for cleanup on shutdown; aborted tasks send no action.
    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    /// Number of tasks that have not finished yet.
    pub fn len(&self) -> usize {
        self.handles
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Whether no task is in flight.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A> Drop for TaskSet<A> {
    fn drop(&mut self) {
        // Abort all in-flight tasks on drop
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Done(usize),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Done"
        }
    }

    async fn recv_within(
        rx: &mut mpsc::UnboundedReceiver<TestAction>,
        ms: u64,
    ) -> Option<TestAction> {
        tokio::time::timeout(Duration::from_millis(ms), rx.recv())
            .await
            .ok()
            .flatten()
    }

    #[tokio::test]
    async fn test_resolutions_run_independently() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskSet::new(tx);

        // A slow resolution followed by a fast one: the second must not
        // replace the first, and the fast one arrives first.
        tasks.spawn(async {
            tokio::time::sleep(Duration::from_millis(60)).await;
            TestAction::Done(1)
        });
        tasks.spawn(async { TestAction::Done(2) });

        let first = recv_within(&mut rx, 200).await.expect("fast resolution");
        let second = recv_within(&mut rx, 200).await.expect("slow resolution");

        assert_eq!(first, TestAction::Done(2));
        assert_eq!(second, TestAction::Done(1));
    }

    #[tokio::test]
    async fn test_abort_all_silences_pending_tasks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskSet::new(tx);

        tasks.spawn(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            TestAction::Done(1)
        });
        assert_eq!(tasks.len(), 1);

        tasks.abort_all();

        assert!(tasks.is_empty());
        assert!(recv_within(&mut rx, 150).await.is_none());
    }

    #[tokio::test]
    async fn test_finished_handles_are_reaped_on_spawn() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskSet::new(tx);

        tasks.spawn(async { TestAction::Done(1) });
        recv_within(&mut rx, 200).await.expect("first resolution");
        // Give the finished task a moment to be observable as such
        tokio::time::sleep(Duration::from_millis(10)).await;

        tasks.spawn(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            TestAction::Done(2)
        });

        // Only the live task remains registered
        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_drop_aborts_in_flight_tasks() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        {
            let mut tasks = TaskSet::new(tx);
            tasks.spawn(async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                TestAction::Done(1)
            });
        }

        assert!(recv_within(&mut rx, 150).await.is_none());
    }
}
