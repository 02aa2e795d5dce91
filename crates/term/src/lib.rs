//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay. It
//! renders a [`core::GameSnapshot`] into a simple framebuffer which is then
//! flushed to the terminal as a diff against the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use stackfall_core as core;
pub use stackfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
