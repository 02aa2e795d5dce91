//! Key mapping from terminal events to game input events.

use crate::types::{InputEvent, KeyState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys whose held state matters to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeldKey {
    Left,
    Right,
    Down,
}

impl HeldKey {
    pub const ALL: [HeldKey; 3] = [HeldKey::Left, HeldKey::Right, HeldKey::Down];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Game event for this key going up or down
    pub fn event(self, state: KeyState) -> InputEvent {
        match self {
            HeldKey::Left => InputEvent::MoveLeft(state),
            HeldKey::Right => InputEvent::MoveRight(state),
            HeldKey::Down => InputEvent::SoftDrop(state),
        }
    }
}

/// Held-style key bound to `code`, if any
pub fn held_key(code: KeyCode) -> Option<HeldKey> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(HeldKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(HeldKey::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(HeldKey::Down),
        _ => None,
    }
}

/// One-shot action bound to `code`, if any
pub fn action_key(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(InputEvent::RotateCw),
        KeyCode::Char(' ') => Some(InputEvent::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(InputEvent::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Reset),
        _ => None,
    }
}

/// Map a single key event to a game event.
///
/// Terminal auto-repeat is dropped; the session repeats held moves itself.
/// One-shot actions only fire on press.
pub fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.kind {
        KeyEventKind::Press => held_key(key.code)
            .map(|k| k.event(KeyState::Pressed))
            .or_else(|| action_key(key.code)),
        KeyEventKind::Release => held_key(key.code).map(|k| k.event(KeyState::Released)),
        KeyEventKind::Repeat => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
