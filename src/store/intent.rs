//! Base trait for intents (transitions) applied to store state.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Start transitions (an operation went in flight)
/// - Terminal transitions (a response or failure arrived)
/// - Local actions (selection, logout)
///
/// Intents are processed by reducers to produce new states; state is
/// never mutated outside of them.
pub trait Intent: Send + 'static {}
