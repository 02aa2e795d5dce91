//! Read-only view of a session, handed to the renderer once per frame.

use arrayvec::ArrayVec;

use crate::compaction::{lift_px, RowOffset, MAX_PENDING_OFFSETS};
use crate::piece::ActivePiece;
use crate::pieces::{cells_at, PieceShape};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
    pub cells: PieceShape,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            col: value.col,
            row: value.row,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Settled blocks as piece codes, 0 = empty
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Origin row the active piece would land on
    pub shadow_row: Option<i8>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ticks: u32,
    /// Pending cosmetic compaction offsets, front first
    pub row_offsets: ArrayVec<RowOffset, MAX_PENDING_OFFSETS>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.shadow_row = None;
        self.next = PieceKind::I;
        self.hold = None;
        self.can_hold = true;
        self.started = false;
        self.paused = false;
        self.game_over = false;
        self.episode_id = 0;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.fall_interval_ticks = 0;
        self.row_offsets.clear();
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }

    /// Cells of the ghost piece at the shadow row
    pub fn shadow_cells(&self) -> Option<PieceShape> {
        let active = self.active?;
        let row = self.shadow_row?;
        Some(cells_at(active.kind, active.rotation, (active.col, row)))
    }

    /// Upward draw offset in pixels for a settled block on `row`
    pub fn row_offset_px(&self, row: u8) -> u16 {
        lift_px(&self.row_offsets, row)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            shadow_row: None,
            next: PieceKind::I,
            hold: None,
            can_hold: true,
            started: false,
            paused: false,
            game_over: false,
            episode_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            fall_interval_ticks: 0,
            row_offsets: ArrayVec::new(),
        };
        s.clear();
        s
    }
}
