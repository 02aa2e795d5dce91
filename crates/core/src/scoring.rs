//! Scoring module - line-clear points, level and gravity speed
//!
//! Rules:
//! - Every cleared line is worth 100 points and counts towards the level.
//! - Every 5th cumulative line raises the level by one and shortens the fall
//!   interval by 10%, never below the configured floor.
//! - An award worth more than a single line is doubled.

use crate::types::{
    BASE_FALL_INTERVAL_TICKS, FALL_INTERVAL_FLOOR_TICKS, INITIAL_LEVEL, LINES_PER_LEVEL,
    MULTI_LINE_MULTIPLIER, POINTS_PER_LINE,
};

/// Outcome of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearAward {
    pub lines: u32,
    pub points: u32,
    pub levels_gained: u32,
}

/// Points for clearing `lines` rows in one lock
///
/// # Examples
///
/// ```
/// use stackfall_core::scoring::line_clear_points;
///
/// assert_eq!(line_clear_points(0), 0);
/// assert_eq!(line_clear_points(1), 100);
/// assert_eq!(line_clear_points(2), 400);
/// assert_eq!(line_clear_points(4), 800);
/// ```
pub fn line_clear_points(lines: u32) -> u32 {
    let base = lines.saturating_mul(POINTS_PER_LINE);
    if base > POINTS_PER_LINE {
        base.saturating_mul(MULTI_LINE_MULTIPLIER)
    } else {
        base
    }
}

/// Fall interval after one level-up
pub fn next_fall_interval(current: u32, floor: u32) -> u32 {
    if current > floor {
        (current * 9 / 10).max(floor)
    } else {
        current
    }
}

/// Score, level, line count and gravity speed for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: u32,
    level: u32,
    lines: u32,
    fall_interval_ticks: u32,
    floor_ticks: u32,
}

impl ScoreKeeper {
    pub fn new(base_fall_interval_ticks: u32, floor_ticks: u32) -> Self {
        Self {
            score: 0,
            level: INITIAL_LEVEL,
            lines: 0,
            fall_interval_ticks: base_fall_interval_ticks,
            floor_ticks,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn fall_interval_ticks(&self) -> u32 {
        self.fall_interval_ticks
    }

    /// Apply the lines cleared by one lock
    pub fn record_clear(&mut self, lines: u32) -> ClearAward {
        let mut levels_gained = 0;
        for _ in 0..lines {
            self.lines += 1;
            if self.lines % LINES_PER_LEVEL == 0 {
                self.level += 1;
                levels_gained += 1;
                self.fall_interval_ticks =
                    next_fall_interval(self.fall_interval_ticks, self.floor_ticks);
            }
        }

        let points = line_clear_points(lines);
        self.score = self.score.saturating_add(points);

        ClearAward {
            lines,
            points,
            levels_gained,
        }
    }
}

impl Default for ScoreKeeper {
    fn default() -> Self {
        Self::new(BASE_FALL_INTERVAL_TICKS, FALL_INTERVAL_FLOOR_TICKS)
    }
}
