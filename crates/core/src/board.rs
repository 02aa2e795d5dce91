//! Board module - the playfield of settled blocks
//!
//! The board is a 10x18 grid where each cell can be empty or hold a settled block.
//! Uses a flat array for cache locality and zero allocation; a cell can hold at
//! most one block, so two settled blocks can never share a position.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges 0..17 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one clear pass, in removal order
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// A single unit square: grid position plus the kind it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub col: i8,
    pub row: i8,
    pub kind: PieceKind,
}

impl Block {
    pub fn new(col: i8, row: i8, kind: PieceKind) -> Self {
        Self { col, row, kind }
    }

    pub fn pos(&self) -> (i8, i8) {
        (self.col, self.row)
    }
}

/// The game board - 10 columns x 18 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at position (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(None))
    }

    /// Check if position is within bounds and holds a settled block
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// True if any candidate cell is off the board or on a settled block
    pub fn would_collide(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().any(|&(col, row)| !self.is_valid(col, row))
    }

    /// Move a piece's blocks into the board
    ///
    /// Callers check the resting position with [`Board::would_collide`] first,
    /// so every block lands in bounds on an empty cell.
    pub fn commit(&mut self, blocks: [Block; 4]) {
        for block in blocks {
            debug_assert!(
                self.is_valid(block.col, block.row),
                "commit onto invalid cell {:?}",
                block.pos()
            );
            self.set(block.col, block.row, Some(block.kind));
        }
    }

    /// Check if a row holds exactly `width` settled blocks
    pub fn is_row_complete(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove a row and shift every row above it down by one
    pub fn remove_row(&mut self, row: usize) {
        if row >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for r in (1..=row).rev() {
            let src_start = (r - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, r * width);
        }

        self.cells[..width].fill(None);
    }

    /// Remove complete rows until none remain
    ///
    /// Each pass rescans from the top, so a row that only becomes complete
    /// after an earlier shift is still found. Returns the removed row
    /// indices in removal order; its length is the number of lines cleared.
    pub fn clear_completed_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();

        while let Some(row) = (0..BOARD_HEIGHT as usize).find(|&r| self.is_row_complete(r)) {
            self.remove_row(row);
            cleared.push(row as u8);
        }

        cleared
    }

    /// Iterate over all settled blocks, top row first
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        let width = BOARD_WIDTH as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|kind| Block::new((idx % width) as i8, (idx / width) as i8, kind))
        })
    }

    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Write the board as piece codes (0 = empty) for snapshots
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, out_cell) in out_row.iter_mut().enumerate() {
                *out_cell = self.cells[row * width + col].map_or(0, PieceKind::code);
            }
        }
    }

    /// Fill every column of `row` except those listed in `gaps` (for tests)
    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, row: i8, gaps: &[i8], kind: PieceKind) {
        for col in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&col) {
                self.set(col, row, Some(kind));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
