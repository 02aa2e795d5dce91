//! Left/right auto-repeat
//!
//! A press moves once immediately and arms an initial delay; after it elapses
//! the held key repeats at a fixed period until released. Timers run on the
//! monotonic clock, and periods missed between polls are caught up so the
//! repeat rate does not depend on the frame rate.

use crate::types::{BOARD_WIDTH, REPEAT_INITIAL_DELAY_MS, REPEAT_PERIOD_MS};

/// Repeats fired in one poll are capped here; the piece cannot travel further.
const MAX_REPEATS_PER_POLL: u32 = BOARD_WIDTH as u32;

/// Horizontal direction of a held movement key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for one step in this direction
    pub fn delta(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Two-phase repeat timer for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct KeyRepeat {
    held: bool,
    next_fire_ms: u64,
}

impl KeyRepeat {
    fn press(&mut self, now_ms: u64, initial_delay_ms: u32) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        self.next_fire_ms = now_ms + initial_delay_ms as u64;
        true
    }

    fn release(&mut self) {
        self.held = false;
    }

    fn poll(&mut self, now_ms: u64, period_ms: u32) -> u32 {
        if !self.held || now_ms < self.next_fire_ms {
            return 0;
        }
        let period = period_ms.max(1) as u64;
        let due = 1 + (now_ms - self.next_fire_ms) / period;
        let fired = due.min(MAX_REPEATS_PER_POLL as u64);
        if fired < due {
            self.next_fire_ms = now_ms + period;
        } else {
            self.next_fire_ms += fired * period;
        }
        fired as u32
    }
}

/// Repeats due for each direction after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepeatBurst {
    pub left: u32,
    pub right: u32,
}

/// Tracks held state and repeat timing for both horizontal directions.
#[derive(Debug, Clone)]
pub struct AutoRepeat {
    left: KeyRepeat,
    right: KeyRepeat,
    initial_delay_ms: u32,
    period_ms: u32,
}

impl AutoRepeat {
    pub fn new() -> Self {
        Self::with_config(REPEAT_INITIAL_DELAY_MS, REPEAT_PERIOD_MS)
    }

    pub fn with_config(initial_delay_ms: u32, period_ms: u32) -> Self {
        Self {
            left: KeyRepeat::default(),
            right: KeyRepeat::default(),
            initial_delay_ms,
            period_ms,
        }
    }

    fn key_mut(&mut self, direction: Direction) -> &mut KeyRepeat {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Register a press. Returns true when the key was not already held,
    /// in which case the caller performs the immediate first move.
    pub fn press(&mut self, direction: Direction, now_ms: u64) -> bool {
        let delay = self.initial_delay_ms;
        self.key_mut(direction).press(now_ms, delay)
    }

    pub fn release(&mut self, direction: Direction) {
        self.key_mut(direction).release();
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left.held,
            Direction::Right => self.right.held,
        }
    }

    /// Collect the repeats that have come due by `now_ms`
    pub fn poll(&mut self, now_ms: u64) -> RepeatBurst {
        RepeatBurst {
            left: self.left.poll(now_ms, self.period_ms),
            right: self.right.poll(now_ms, self.period_ms),
        }
    }

    pub fn reset(&mut self) {
        self.left = KeyRepeat::default();
        self.right = KeyRepeat::default();
    }
}

impl Default for AutoRepeat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_fires_once_then_waits_for_delay() {
        let mut ar = AutoRepeat::with_config(200, 50);
        assert!(ar.press(Direction::Left, 1_000));
        // A second press while held is not a new press.
        assert!(!ar.press(Direction::Left, 1_010));

        assert_eq!(ar.poll(1_199).left, 0);
        assert_eq!(ar.poll(1_200).left, 1);
        assert_eq!(ar.poll(1_249).left, 0);
        assert_eq!(ar.poll(1_250).left, 1);
    }

    #[test]
    fn test_slow_frames_catch_up() {
        let mut ar = AutoRepeat::with_config(200, 50);
        ar.press(Direction::Right, 0);
        // One poll 320ms later: repeats due at 200, 250, 300.
        assert_eq!(ar.poll(320), RepeatBurst { left: 0, right: 3 });
        // Next due at 350.
        assert_eq!(ar.poll(349).right, 0);
        assert_eq!(ar.poll(350).right, 1);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut ar = AutoRepeat::with_config(200, 50);
        ar.press(Direction::Left, 0);
        assert_eq!(ar.poll(60_000).left, MAX_REPEATS_PER_POLL);
        assert_eq!(ar.poll(60_049).left, 0);
        assert_eq!(ar.poll(60_050).left, 1);
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ar = AutoRepeat::with_config(200, 50);
        ar.press(Direction::Left, 0);
        ar.release(Direction::Left);
        assert!(!ar.is_held(Direction::Left));
        assert_eq!(ar.poll(1_000), RepeatBurst::default());
        // Pressing again restarts the initial delay.
        assert!(ar.press(Direction::Left, 1_000));
        assert_eq!(ar.poll(1_100).left, 0);
    }

    #[test]
    fn test_directions_are_independent() {
        let mut ar = AutoRepeat::with_config(100, 25);
        ar.press(Direction::Left, 0);
        ar.press(Direction::Right, 50);
        assert_eq!(ar.poll(125), RepeatBurst { left: 2, right: 0 });
        assert_eq!(ar.poll(150), RepeatBurst { left: 1, right: 1 });
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut ar = AutoRepeat::new();
        ar.press(Direction::Left, 0);
        ar.press(Direction::Right, 0);
        ar.reset();
        assert!(!ar.is_held(Direction::Left));
        assert!(!ar.is_held(Direction::Right));
        assert_eq!(ar.poll(10_000), RepeatBurst::default());
    }
}
