//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and all session state. It has no
//! dependency on the terminal or on input devices; time enters only through
//! the [`clock::Clock`] trait, so a session driven by a
//! [`clock::ManualClock`] replays identically for the same seed.
//!
//! # Module Structure
//!
//! - [`board`]: 10x18 grid of settled blocks, collision and line clearing
//! - [`pieces`]: shape table for the seven kinds in all four rotations
//! - [`piece`]: the falling piece and its move / rotate / gravity rules
//! - [`rng`]: seeded randomizer with the previous-kind reroll
//! - [`scoring`]: points, lines, level and fall speed
//! - [`repeat`]: left/right auto-repeat timing
//! - [`compaction`]: cosmetic slide-down offsets after a clear
//! - [`config`]: tunable session parameters and their validation
//! - [`session`]: [`GameSession`], which ties the above together
//! - [`snapshot`]: the per-frame view handed to renderers
//!
//! # Game Rules
//!
//! - **No kicks**: a rotation that collides is rejected outright
//! - **Lock on landing**: a piece that fell at least once locks the first
//!   time gravity cannot move it; a piece that never fell ends the game
//! - **Hold**: once per drop cycle, a swap respawns the held kind at the
//!   spawn origin
//! - **Scoring**: 100 per line, multi-line awards doubled
//! - **Levels**: one level per 5 lines, each 10% faster down to a floor
//!
//! # Example
//!
//! ```
//! use stackfall_core::{GameSession, SessionConfig};
//! use stackfall_core::clock::ManualClock;
//! use stackfall_core::types::InputEvent;
//!
//! let mut game = GameSession::with_clock(SessionConfig::default().with_seed(7), ManualClock::new(0))
//!     .unwrap();
//! game.start();
//!
//! game.handle_input(InputEvent::RotateCw);
//! game.handle_input(InputEvent::HardDrop);
//!
//! assert!(game.take_last_event().is_some());
//! assert_eq!(game.board().block_count(), 4);
//! ```
//!
//! # Timing
//!
//! [`GameSession::tick`] is called once per frame (16 ms). Gravity is counted
//! in ticks; auto-repeat and the hold debounce read the session clock.

pub mod board;
pub mod clock;
pub mod compaction;
pub mod config;
pub mod piece;
pub mod pieces;
pub mod repeat;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use stackfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, SessionConfig};
pub use piece::ActivePiece;
pub use rng::{PieceRandomizer, SimpleRng};
pub use session::GameSession;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
