//! Action trait for type-safe state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state, plus the terminal results of
/// async resolutions. They should be:
/// - Clone: Actions may be logged or handed to middleware
/// - Debug: For debugging and logging
/// - Send + 'static: For async dispatch across tasks
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}
