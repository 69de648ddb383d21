//! UI components.

/// Background effects, cursor and text widgets.
pub mod effects;
