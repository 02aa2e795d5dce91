//! Active piece - the falling tetromino and its movement rules
//!
//! The piece only stores its kind, rotation and origin. Its four cells are
//! always re-derived through [`cells_at`], and every move is checked against
//! the board before it is applied, so a live piece never overlaps settled
//! blocks or leaves the board.

use crate::board::{Block, Board};
use crate::pieces::{cells_at, PieceShape};
use crate::types::{PieceKind, Rotation};

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityOutcome {
    /// The piece moved down one row
    Fell,
    /// The piece is resting after having fallen at least once; lock it
    Landed,
    /// The piece could not fall even once since it spawned
    Stuck,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
    has_moved_down: bool,
    held_eligible: bool,
}

impl ActivePiece {
    /// Create a piece at the spawn origin, facing North
    pub fn spawn(kind: PieceKind, (col, row): (i8, i8)) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            col,
            row,
            has_moved_down: false,
            held_eligible: true,
        }
    }

    pub fn origin(&self) -> (i8, i8) {
        (self.col, self.row)
    }

    /// Current board cells of the piece
    pub fn cells(&self) -> PieceShape {
        cells_at(self.kind, self.rotation, self.origin())
    }

    /// Current cells as blocks, ready to be committed
    pub fn blocks(&self) -> [Block; 4] {
        self.cells().map(|(col, row)| Block::new(col, row, self.kind))
    }

    pub fn has_moved_down(&self) -> bool {
        self.has_moved_down
    }

    pub fn held_eligible(&self) -> bool {
        self.held_eligible
    }

    /// Block further holds until the next natural spawn
    pub fn revoke_hold(&mut self) {
        self.held_eligible = false;
    }

    /// Whether the piece could sit at `origin + (dc, dr)` under `rotation`
    fn fits(&self, board: &Board, rotation: Rotation, dc: i8, dr: i8) -> bool {
        let origin = (self.col + dc, self.row + dr);
        !board.would_collide(&cells_at(self.kind, rotation, origin))
    }

    /// Translate the piece if the destination is free; otherwise no-op
    pub fn try_move(&mut self, board: &Board, dc: i8, dr: i8) -> bool {
        if !self.fits(board, self.rotation, dc, dr) {
            return false;
        }
        self.col += dc;
        self.row += dr;
        true
    }

    /// Rotate clockwise in place; a colliding rotation is rejected
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let next = self.rotation.rotate_cw();
        if !self.fits(board, next, 0, 0) {
            return false;
        }
        self.rotation = next;
        true
    }

    /// Advance one row under gravity
    pub fn gravity_step(&mut self, board: &Board) -> GravityOutcome {
        if self.try_move(board, 0, 1) {
            self.has_moved_down = true;
            GravityOutcome::Fell
        } else if self.has_moved_down {
            GravityOutcome::Landed
        } else {
            GravityOutcome::Stuck
        }
    }

    /// Rows the piece can still fall before it would collide
    pub fn drop_distance(&self, board: &Board) -> i8 {
        let mut distance = 0;
        while self.fits(board, self.rotation, 0, distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Origin row after an uninterrupted hard drop
    pub fn shadow_row(&self, board: &Board) -> i8 {
        self.row + self.drop_distance(board)
    }

    /// Move straight down to the landing row, returning the rows travelled
    pub fn hard_drop(&mut self, board: &Board) -> i8 {
        let distance = self.drop_distance(board);
        self.row += distance;
        distance
    }
}
