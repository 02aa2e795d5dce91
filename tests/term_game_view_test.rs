use stackfall::core::clock::ManualClock;
use stackfall::core::{GameSession, GameSnapshot, SessionConfig};
use stackfall::term::{AnchorY, FrameBuffer, GameView, Viewport};
use stackfall::types::{InputEvent, PieceKind};

fn started_snapshot() -> GameSnapshot {
    let mut gs = GameSession::with_clock(SessionConfig::default(), ManualClock::new(0)).unwrap();
    gs.start();
    gs.snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSnapshot::default();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1: board is 20x18, plus border 22x20.
    let fb = view.render(&snap, Viewport::new(22, 20));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 19).unwrap().ch, '└');
    assert_eq!(fb.get(21, 19).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_as_two_chars_wide() {
    let mut snap = started_snapshot();
    snap.board[17][0] = PieceKind::I.code();
    snap.active = None;
    snap.shadow_row = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 20));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    assert_eq!(fb.get(1, 18).unwrap().ch, '█');
    assert_eq!(fb.get(2, 18).unwrap().ch, '█');
    assert_eq!(fb.get(3, 18).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_shadow() {
    let snap = started_snapshot();
    let active = snap.active.unwrap();
    let shadow = snap.shadow_cells().unwrap();

    let fb = GameView::default().render(&snap, Viewport::new(22, 20));
    for (x, y) in active.cells {
        assert_eq!(fb.get(1 + x as u16 * 2, 1 + y as u16).unwrap().ch, '█');
    }
    for (x, y) in shadow {
        assert_eq!(fb.get(1 + x as u16 * 2, 1 + y as u16).unwrap().ch, '░');
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = started_snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;
    snap.hold = Some(PieceKind::T);

    let fb = GameView::default().render(&snap, Viewport::new(60, 20));
    let all = screen_text(&fb);
    for word in ["SCORE", "1234", "LEVEL", "LINES", "10", "HOLD", "NEXT"] {
        assert!(all.contains(word), "missing {word}");
    }

    // Too narrow: only the board.
    let fb = GameView::default().render(&snap, Viewport::new(30, 20));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_overlays() {
    let mut gs = GameSession::with_clock(SessionConfig::default(), ManualClock::new(0)).unwrap();
    gs.start();
    gs.handle_input(InputEvent::Pause);
    let fb = GameView::default().render(&gs.snapshot(), Viewport::new(22, 20));
    assert!(screen_text(&fb).contains("PAUSED"));

    let mut snap = gs.snapshot();
    snap.paused = false;
    snap.game_over = true;
    let fb = GameView::default().render(&snap, Viewport::new(22, 20));
    assert!(screen_text(&fb).contains("GAME OVER"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameSnapshot::default();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 20) / 2 = 5
    assert_eq!(fb.get(0, 5).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameSnapshot::default();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_survives_tiny_viewport() {
    let snap = started_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}
