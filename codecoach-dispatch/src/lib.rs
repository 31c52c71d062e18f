//! Core dispatch machinery for codecoach
//!
//! This crate provides the foundational abstractions for the codecoach
//! client pipeline, following a Redux/Elm-inspired architecture:
//!
//! - **Action**: events that describe state transitions
//! - **Store**: centralized state container with an effect-emitting reducer
//! - **TaskSet**: async resolution lifecycle
//! - **Runtime**: the select loop that ties them together and publishes
//!   state snapshots to subscribers
//!
//! # Two-phase action pattern
//!
//! Async operations use paired actions: an *intent* triggers the work and a
//! `Did*` *result* carries the outcome back.
//!
//! 1. The intent's reducer branch applies the request transition
//!    synchronously (set loading, clear error) and returns an effect.
//! 2. The effect handler spawns the resolution through the task set.
//! 3. The resolution completes with exactly one terminal action
//!    (`DidX` / `DidXError`), which the reducer applies like any other.
//!
//! ```ignore
//! #[derive(Clone, Debug)]
//! enum Action {
//!     DataFetch { id: String },
//!     DataDidLoad { id: String, payload: Vec<u8> },
//!     DataDidError { id: String, error: String },
//! }
//! ```
//!
//! Reducers stay pure; all I/O lives in effect handlers and the futures
//! they spawn.

pub mod action;
pub mod runtime;
pub mod store;
pub mod tasks;

// Core trait exports
pub use action::Action;

// Store exports
pub use store::{
    DispatchResult, EffectReducer, LoggingMiddleware, Middleware, NoopMiddleware, Store,
};

// Task exports
pub use tasks::TaskSet;

// Runtime exports
pub use runtime::{EffectContext, Runtime};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::runtime::{EffectContext, Runtime};
    pub use crate::store::{
        DispatchResult, EffectReducer, LoggingMiddleware, Middleware, NoopMiddleware, Store,
    };
    pub use crate::tasks::TaskSet;
}
