//! Effect-aware state store with reducer pattern
//!
//! The store holds the materialized view and provides a single point for
//! state transitions through [`Store::dispatch`]. Reducers are pure: they
//! mutate state and *describe* follow-up work as effects, they never perform
//! I/O themselves. Effects are handled outside the store (see
//! [`Runtime`](crate::Runtime)), which keeps the state machine inspectable
//! and testable.

use crate::Action;

/// Result of dispatching an action.
///
/// Contains the state change indicator and any effects to be processed
/// after the transition has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// A single effect without a state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the changed flag to true.
    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A pure transition function: mutates state, returns change status and
/// effects. No I/O, no asynchrony, deterministic given its inputs.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Middleware trait for intercepting actions
///
/// Implement this to add logging or other cross-cutting concerns around the
/// reducer. Middleware observes actions; it cannot rewrite them.
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer has processed the action
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only (the default)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "action processed"
            );
        }
    }
}

/// Centralized state store with an effect-emitting reducer.
///
/// # Type Parameters
/// * `S` - The state type
/// * `A` - The action type (must implement [`Action`])
/// * `E` - The effect type emitted by the reducer
/// * `M` - Middleware, [`NoopMiddleware`] by default
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct AppState { loading: bool, data: Option<String> }
///
/// #[derive(Clone, Debug)]
/// enum AppAction { Load, DidLoad(String) }
///
/// enum Effect { Fetch }
///
/// fn reducer(state: &mut AppState, action: AppAction) -> DispatchResult<Effect> {
///     match action {
///         AppAction::Load => {
///             state.loading = true;
///             DispatchResult::changed_with(Effect::Fetch)
///         }
///         AppAction::DidLoad(data) => {
///             state.loading = false;
///             state.data = Some(data);
///             DispatchResult::changed()
///         }
///     }
/// }
///
/// let mut store = Store::new(AppState::default(), reducer);
/// let result = store.dispatch(AppAction::Load);
/// assert!(result.changed);
/// ```
pub struct Store<S, A: Action, E, M: Middleware<A> = NoopMiddleware> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    middleware: M,
}

impl<S, A: Action, E> Store<S, A, E> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            middleware: NoopMiddleware,
        }
    }
}

impl<S, A: Action, E, M: Middleware<A>> Store<S, A, E, M> {
    /// Replace the middleware, keeping state and reducer
    pub fn with_middleware<M2: Middleware<A>>(self, middleware: M2) -> Store<S, A, E, M2> {
        Store {
            state: self.state,
            reducer: self.reducer,
            middleware,
        }
    }

    /// Dispatch an action through middleware and reducer
    ///
    /// Returns whether the state changed and any effects to process.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, result.changed);
        result
    }

    /// Get a reference to the current state
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state
    ///
    /// Use sparingly - prefer dispatching actions for state changes.
    /// This is mainly useful for initialization.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Get a reference to the middleware
    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}
