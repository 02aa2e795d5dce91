//! Held-key tracking for terminal environments.
//!
//! Many terminals never report key releases. Until a real release has been
//! seen, a held key that goes quiet for longer than the release timeout is
//! released on the game's behalf so a single tap does not turn into an
//! endless slide.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};

use crate::map::{held_key, map_key_event, HeldKey};
use crate::types::{InputEvent, KeyState};

// Shorter than typical terminal repeat delays, long enough to cover a tap.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Events produced from one terminal key event
pub type KeyEvents = ArrayVec<InputEvent, 2>;

/// Releases synthesized by [`KeyTracker::expire`]
pub type Releases = ArrayVec<InputEvent, 3>;

#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Last time each held key was seen down, `None` when up
    last_seen_ms: [Option<u64>; 3],
    releases_reported: bool,
    key_release_timeout_ms: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            last_seen_ms: [None; 3],
            releases_reported: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout_ms
    }

    /// Whether the terminal has shown that it reports releases
    pub fn releases_reported(&self) -> bool {
        self.releases_reported
    }

    pub fn is_held(&self, key: HeldKey) -> bool {
        self.last_seen_ms[key.index()].is_some()
    }

    /// Translate a terminal key event observed at `now_ms`
    ///
    /// Presses of an already held key only refresh its timestamp. Terminal
    /// auto-repeat of a key that was released on timeout presses it again.
    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) -> KeyEvents {
        let mut out = KeyEvents::new();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return out;
        }

        let Some(held) = held_key(key.code) else {
            if let Some(event) = map_key_event(key) {
                // The session drops held keys on pause and reset; stay in step.
                if matches!(event, InputEvent::Pause | InputEvent::Reset) {
                    self.release_all();
                }
                out.push(event);
            }
            return out;
        };

        let slot = &mut self.last_seen_ms[held.index()];
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let was_held = slot.is_some();
                *slot = Some(now_ms);
                if !was_held {
                    out.push(held.event(KeyState::Pressed));
                }
            }
            KeyEventKind::Release => {
                self.releases_reported = true;
                if slot.take().is_some() {
                    out.push(held.event(KeyState::Released));
                }
            }
        }
        out
    }

    /// Release keys that have gone quiet, when the terminal hides releases
    pub fn expire(&mut self, now_ms: u64) -> Releases {
        let mut out = Releases::new();
        if self.releases_reported {
            return out;
        }

        let timeout = self.key_release_timeout_ms;
        for key in HeldKey::ALL {
            let slot = &mut self.last_seen_ms[key.index()];
            let stale = slot.is_some_and(|seen| now_ms.saturating_sub(seen) > timeout);
            if stale {
                *slot = None;
                out.push(key.event(KeyState::Released));
            }
        }
        out
    }

    /// Forget all held keys, returning the releases the game should see
    pub fn release_all(&mut self) -> Releases {
        let mut out = Releases::new();
        for key in HeldKey::ALL {
            if self.last_seen_ms[key.index()].take().is_some() {
                out.push(key.event(KeyState::Released));
            }
        }
        out
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
