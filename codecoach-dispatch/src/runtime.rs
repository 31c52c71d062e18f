//! Headless dispatch runtime
//!
//! Wires the action channel, the effect-aware store, and the task set
//! into a single select loop. The loop owns the store: every transition is
//! applied atomically and sequentially on this one task, so the state is
//! never observed mid-transition. Resolutions spawned for effects run
//! concurrently and feed their terminal actions back into the same channel.
//!
//! Subscribers observe state through a `tokio::sync::watch` channel: each
//! changed dispatch publishes a fresh snapshot.
//!
//! # Example
//!
//! ```ignore
//! let store = Store::new(AppState::default(), reducer);
//! let mut runtime = Runtime::from_store(store);
//! let handle = runtime.action_tx();
//! let mut states = runtime.watch_state();
//!
//! tokio::spawn(async move {
//!     runtime.run(|effect, ctx| match effect {
//!         Effect::Fetch { id } => {
//!             ctx.tasks().spawn(async move {
//!                 match api::fetch(&id).await {
//!                     Ok(data) => Action::DidLoad(data),
//!                     Err(e) => Action::DidError(e.to_string()),
//!                 }
//!             });
//!         }
//!     })
//!     .await;
//! });
//!
//! let _ = handle.send(Action::Load);
//! states.changed().await.unwrap();
//! ```

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::store::{EffectReducer, Middleware, NoopMiddleware, Store};
use crate::tasks::TaskSet;
use crate::Action;

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskSet<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Send an action directly, bypassing any async work.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Access the task set.
    pub fn tasks(&mut self) -> &mut TaskSet<A> {
        self.tasks
    }
}

/// Runtime for effect-based stores without a UI event loop.
pub struct Runtime<S, A: Action, E, M: Middleware<A> = NoopMiddleware> {
    store: Store<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    tasks: TaskSet<A>,
    state_tx: watch::Sender<S>,
    cancel: CancellationToken,
}

impl<S: Clone, A: Action, E> Runtime<S, A, E, NoopMiddleware> {
    /// Create a runtime from state + effect reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(Store::new(state, reducer))
    }
}

impl<S: Clone, A: Action, E, M: Middleware<A>> Runtime<S, A, E, M> {
    /// Create a runtime from an existing store.
    pub fn from_store(store: Store<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskSet::new(action_tx.clone());
        let (state_tx, _) = watch::channel(store.state().clone());

        Self {
            store,
            action_tx,
            action_rx,
            tasks,
            state_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Clone the action sender.
    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Subscribe to published state snapshots.
    pub fn watch_state(&self) -> watch::Receiver<S> {
        self.state_tx.subscribe()
    }

    /// The token that stops the run loop when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Access the task set.
    pub fn tasks(&mut self) -> &mut TaskSet<A> {
        &mut self.tasks
    }

    /// Run the action loop until the cancel token fires.
    ///
    /// For each received action: dispatch to the store, hand resulting
    /// effects to `handle_effect`, and publish the new state snapshot if the
    /// transition changed it. All outstanding tasks are aborted on exit.
    pub async fn run<F>(mut self, mut handle_effect: F)
    where
        F: FnMut(E, &mut EffectContext<'_, A>),
    {
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,

                action = self.action_rx.recv() => {
                    // The runtime holds a sender, so recv() only returns
                    // None once the loop itself is being torn down.
                    let Some(action) = action else { break };

                    let result = self.store.dispatch(action);

                    if result.has_effects() {
                        tracing::trace!(effects = result.effects.len(), "handling effects");
                        let mut ctx = EffectContext {
                            action_tx: &self.action_tx,
                            tasks: &mut self.tasks,
                        };
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }

                    if result.changed {
                        let _ = self.state_tx.send(self.store.state().clone());
                    }
                }
            }
        }

        self.tasks.abort_all();
    }
}
