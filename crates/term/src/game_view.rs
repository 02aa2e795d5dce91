//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::spawn_shape;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, CELL_PX};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Top-left corner of the board frame plus its outer size
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_h = BOARD_HEIGHT as u16 * self.cell_h;
        let w = board_w + 2;
        let h = board_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', CellStyle::new(PLAY_BG, PLAY_BG));
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK));

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                self.draw_empty_cell(fb, frame, x as u16, y as u16);
            }
        }

        // Settled blocks, lifted by any pending compaction offset.
        for y in 0..BOARD_HEIGHT {
            let lift = self.lift_rows(snap.row_offset_px(y));
            let Some(draw_y) = (y as u16).checked_sub(lift) else {
                continue;
            };
            for x in 0..BOARD_WIDTH {
                let code = snap.board[y as usize][x as usize];
                if let Some(kind) = PieceKind::from_code(code) {
                    self.draw_block(fb, frame, x as u16, draw_y, kind);
                }
            }
        }

        if let Some(cells) = snap.shadow_cells() {
            let style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
            for (x, y) in cells {
                if let Some((x, y)) = in_board(x, y) {
                    self.fill_cell(fb, frame, x, y, '░', style);
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells {
                if let Some((x, y)) = in_board(x, y) {
                    self.draw_block(fb, frame, x, y, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if !snap.started {
            draw_overlay_text(fb, frame, "PRESS R");
        } else if snap.game_over {
            draw_overlay_text(fb, frame, "GAME OVER");
        } else if snap.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Pixel offset in terminal rows, rounded to the nearest row
    fn lift_rows(&self, offset_px: u16) -> u16 {
        let px = offset_px as u32 * self.cell_h as u32;
        ((px + CELL_PX as u32 / 2) / CELL_PX as u32) as u16
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAY_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        let hold_style = if snap.can_hold { value } else { value.dim() };
        fb.put_str(panel_x, y, "HOLD", label);
        match snap.hold {
            Some(kind) => self.draw_preview(fb, panel_x, y + 1, kind, !snap.can_hold),
            None => fb.put_str(panel_x, y + 1, "-", hold_style),
        }
        y = y.saturating_add(4);

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y + 1, snap.next, false);
    }

    /// Small two-row picture of a piece in its spawn orientation
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dim: bool) {
        let shape = spawn_shape(kind);
        let top = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let mut style = CellStyle::new(piece_color(kind), Rgb::BLACK);
        if dim {
            style = style.dim();
        }
        for (dx, dy) in shape {
            let cx = x + dx as u16 * 2;
            let cy = y + (dy - top) as u16;
            fb.put_str(cx, cy, "██", style);
        }
    }
}

fn in_board(x: i8, y: i8) -> Option<(u16, u16)> {
    let inside = (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y);
    inside.then_some((x as u16, y as u16))
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::WHITE, Rgb::BLACK).bold();
    fb.put_str(x, mid_y, text, style);
}
