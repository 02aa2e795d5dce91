//! Cosmetic row compaction
//!
//! Clearing a row moves the blocks above it down immediately. To let the
//! renderer slide them instead of snapping, each cleared row queues a pixel
//! offset that only the front entry of the queue works off, a few pixels per
//! tick. Nothing here touches the board.

use std::collections::VecDeque;

use crate::types::{BOARD_HEIGHT, CELL_PX, COMPACTION_STEP_PX};

/// Pending offsets beyond this are dropped oldest-first.
pub const MAX_PENDING_OFFSETS: usize = BOARD_HEIGHT as usize;

/// Blocks at or above `row` are drawn `remaining_px` higher than their cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOffset {
    pub row: u8,
    pub remaining_px: u16,
}

/// FIFO of pending cosmetic offsets
#[derive(Debug, Clone)]
pub struct CompactionQueue {
    pending: VecDeque<RowOffset>,
    step_px: u16,
}

impl CompactionQueue {
    pub fn new() -> Self {
        Self::with_step(COMPACTION_STEP_PX)
    }

    pub fn with_step(step_px: u16) -> Self {
        Self {
            pending: VecDeque::with_capacity(MAX_PENDING_OFFSETS),
            step_px: step_px.max(1),
        }
    }

    /// Queue a one-cell slide for everything at or above `row`
    pub fn push(&mut self, row: u8) {
        if self.pending.len() == MAX_PENDING_OFFSETS {
            self.pending.pop_front();
        }
        self.pending.push_back(RowOffset {
            row,
            remaining_px: CELL_PX,
        });
    }

    /// Queue the rows removed by one clear pass, in removal order
    ///
    /// Rows are reported in board coordinates at the moment each was removed.
    /// A later removal below an earlier one shifts that earlier boundary down
    /// a row, so each entry is moved into the settled board's coordinates.
    pub fn push_cleared(&mut self, rows: &[u8]) {
        for (i, &row) in rows.iter().enumerate() {
            let shift = rows[i + 1..].iter().filter(|&&later| later > row).count();
            self.push(row.saturating_add(shift as u8));
        }
    }

    /// Advance the front entry by one step, dropping it once finished
    pub fn step(&mut self) {
        let Some(front) = self.pending.front_mut() else {
            return;
        };
        front.remaining_px = front.remaining_px.saturating_sub(self.step_px);
        if front.remaining_px == 0 {
            self.pending.pop_front();
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &RowOffset> + '_ {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Total upward draw offset for a block sitting on `row`
pub fn lift_px<'a>(offsets: impl IntoIterator<Item = &'a RowOffset>, row: u8) -> u16 {
    offsets
        .into_iter()
        .filter(|o| row <= o.row)
        .map(|o| o.remaining_px)
        .sum()
}

impl Default for CompactionQueue {
    fn default() -> Self {
        Self::new()
    }
}
