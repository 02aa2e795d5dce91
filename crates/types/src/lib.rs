//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 18 rows (indexed 0-17, row 0 at the top)
//! - **Spawn position**: (3, 0), the top-left corner of the piece's 4x4 box
//!
//! # Timing Constants
//!
//! Gravity is counted in frame ticks, input repeat in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval (~60 FPS) |
//! | `BASE_FALL_INTERVAL_TICKS` | 15 | Ticks per row at level 1 |
//! | `SOFT_DROP_INTERVAL_TICKS` | 2 | Ticks per row while soft drop is held |
//! | `FALL_INTERVAL_FLOOR_TICKS` | 2 | Fastest gravity reachable by leveling |
//! | `REPEAT_INITIAL_DELAY_MS` | 200 | Held left/right delay before repeating |
//! | `REPEAT_PERIOD_MS` | 50 | Held left/right repeat period |
//! | `HOLD_COOLDOWN_MS` | 200 | Minimum spacing between hold inputs |
//!
//! # Examples
//!
//! ```
//! use stackfall_types::{PieceKind, Rotation, InputEvent, KeyState, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//!
//! assert_eq!(InputEvent::MoveLeft(KeyState::Pressed).as_str(), "moveLeft");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 18);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (18 rows)
pub const BOARD_HEIGHT: u8 = 18;

/// Column of the spawn box's left edge
pub const SPAWN_COL: i8 = 3;

/// Row of the spawn box's top edge
pub const SPAWN_ROW: i8 = 0;

/// Frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1, in ticks per row
pub const BASE_FALL_INTERVAL_TICKS: u32 = 15;

/// Gravity interval while soft drop is held, in ticks per row
pub const SOFT_DROP_INTERVAL_TICKS: u32 = 2;

/// Leveling never speeds gravity past this many ticks per row
pub const FALL_INTERVAL_FLOOR_TICKS: u32 = 2;

/// Delay before a held left/right input starts repeating
pub const REPEAT_INITIAL_DELAY_MS: u32 = 200;

/// Period between repeats of a held left/right input
pub const REPEAT_PERIOD_MS: u32 = 50;

/// Hold inputs closer together than this are ignored
pub const HOLD_COOLDOWN_MS: u32 = 200;

/// Points per cleared line
pub const POINTS_PER_LINE: u32 = 100;

/// Multiplier applied to an award worth more than a single line
pub const MULTI_LINE_MULTIPLIER: u32 = 2;

/// Every this many cleared lines the level goes up by one
pub const LINES_PER_LEVEL: u32 = 5;

/// Starting level
pub const INITIAL_LEVEL: u32 = 1;

/// Rendered size of one cell, used by the cosmetic compaction offsets
pub const CELL_PX: u16 = 30;

/// Pixels the front compaction offset shrinks per tick
pub const COMPACTION_STEP_PX: u16 = 5;

/// The seven tetromino piece kinds
///
/// The declaration order is the piece index used by the randomizer
/// and the geometry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in index order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind at `index`, if it is in `0..7`
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Non-zero grid code (1..=7) used in snapshot boards, where 0 is empty
    pub fn code(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            c => Self::from_index(c as usize - 1),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation states, cycling North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() as u8 + 1)
    }

    /// Rotation state `n mod 4`
    pub fn from_index(n: u8) -> Self {
        match n % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Whether a held input went down or came back up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Discrete input events delivered to the session
///
/// Movement and soft drop carry a [`KeyState`] because they have held
/// behavior (auto-repeat and fast gravity); the rest act on press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Move one column left, repeating while held
    MoveLeft(KeyState),
    /// Move one column right, repeating while held
    MoveRight(KeyState),
    /// Rotate 90° clockwise
    RotateCw,
    /// Fast gravity while held
    SoftDrop(KeyState),
    /// Drop to the landing row and lock
    HardDrop,
    /// Stash the active piece (once per drop cycle)
    Hold,
    /// Toggle pause
    Pause,
    /// Discard the game and start over
    Reset,
}

impl InputEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputEvent::MoveLeft(_) => "moveLeft",
            InputEvent::MoveRight(_) => "moveRight",
            InputEvent::RotateCw => "rotateCw",
            InputEvent::SoftDrop(_) => "softDrop",
            InputEvent::HardDrop => "hardDrop",
            InputEvent::Hold => "hold",
            InputEvent::Pause => "pause",
            InputEvent::Reset => "reset",
        }
    }

    /// True for the release half of a held input
    pub fn is_release(&self) -> bool {
        matches!(
            self,
            InputEvent::MoveLeft(KeyState::Released)
                | InputEvent::MoveRight(KeyState::Released)
                | InputEvent::SoftDrop(KeyState::Released)
        )
    }
}

/// Event emitted after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points_awarded: u32,
    pub levels_gained: u32,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_constants_are_consistent() {
        assert!(BASE_FALL_INTERVAL_TICKS >= FALL_INTERVAL_FLOOR_TICKS);
        assert!(SOFT_DROP_INTERVAL_TICKS >= 1);
        assert!(REPEAT_PERIOD_MS < REPEAT_INITIAL_DELAY_MS);
        assert_eq!(CELL_PX % COMPACTION_STEP_PX, 0);
        assert!(SPAWN_COL >= 0 && SPAWN_COL <= BOARD_WIDTH as i8 - 4);
    }

    #[test]
    fn piece_codes_roundtrip_through_index() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(PieceKind::from_code(0), None);
        assert_eq!(PieceKind::from_code(8), None);
    }
}
