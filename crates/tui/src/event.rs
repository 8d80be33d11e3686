//! Event handling types for the TUI.
//!
//! The autocomplete popup gets first look at a key and reports whether it
//! used it; unused keys fall through to the screen-level bindings.

/// Status of an event after being handled by a widget.
///
/// Returned by key handlers to say whether the key should reach the next
/// handler in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The event was handled by the widget and should not be propagated further.
    Consumed,
    /// The event was not handled by the widget and should be passed to the next handler.
    NotConsumed,
}
