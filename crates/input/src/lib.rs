//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::InputEvent`]s and keeps
//! track of which movement keys are down, including on terminals that never
//! report key releases.

pub mod handler;
pub mod map;

pub use stackfall_types as types;

pub use handler::KeyTracker;
pub use map::{map_key_event, should_quit, HeldKey};
