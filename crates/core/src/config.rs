//! Session configuration
//!
//! Defaults come from the rule constants in `stackfall_types`; a config must
//! pass [`SessionConfig::validate`] before a session is built from it.

use thiserror::Error;

use crate::types::{
    BASE_FALL_INTERVAL_TICKS, BOARD_HEIGHT, BOARD_WIDTH, FALL_INTERVAL_FLOOR_TICKS,
    HOLD_COOLDOWN_MS, REPEAT_INITIAL_DELAY_MS, REPEAT_PERIOD_MS, SOFT_DROP_INTERVAL_TICKS,
    SPAWN_COL, SPAWN_ROW,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("spawn column {0} does not leave room for a 4-wide piece box")]
    SpawnColumn(i8),
    #[error("spawn row {0} does not leave room for a 4-tall piece box")]
    SpawnRow(i8),
    #[error("fall interval floor must be at least 1 tick")]
    ZeroFallFloor,
    #[error("base fall interval {base} is faster than the floor {floor}")]
    FallIntervalBelowFloor { base: u32, floor: u32 },
    #[error("soft drop interval must be at least 1 tick")]
    ZeroSoftDropInterval,
    #[error("repeat period must be at least 1 ms")]
    ZeroRepeatPeriod,
}

/// Tunable rule parameters for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u32,
    pub spawn_col: i8,
    pub spawn_row: i8,
    pub base_fall_interval_ticks: u32,
    pub fall_interval_floor_ticks: u32,
    pub soft_drop_interval_ticks: u32,
    pub repeat_initial_delay_ms: u32,
    pub repeat_period_ms: u32,
    pub hold_cooldown_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            spawn_col: SPAWN_COL,
            spawn_row: SPAWN_ROW,
            base_fall_interval_ticks: BASE_FALL_INTERVAL_TICKS,
            fall_interval_floor_ticks: FALL_INTERVAL_FLOOR_TICKS,
            soft_drop_interval_ticks: SOFT_DROP_INTERVAL_TICKS,
            repeat_initial_delay_ms: REPEAT_INITIAL_DELAY_MS,
            repeat_period_ms: REPEAT_PERIOD_MS,
            hold_cooldown_ms: HOLD_COOLDOWN_MS,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_fall_interval(mut self, ticks: u32) -> Self {
        self.base_fall_interval_ticks = ticks;
        self
    }

    pub fn with_hold_cooldown_ms(mut self, ms: u32) -> Self {
        self.hold_cooldown_ms = ms;
        self
    }

    pub fn with_repeat(mut self, initial_delay_ms: u32, period_ms: u32) -> Self {
        self.repeat_initial_delay_ms = initial_delay_ms;
        self.repeat_period_ms = period_ms;
        self
    }

    pub fn spawn(&self) -> (i8, i8) {
        (self.spawn_col, self.spawn_row)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=BOARD_WIDTH as i8 - 4).contains(&self.spawn_col) {
            return Err(ConfigError::SpawnColumn(self.spawn_col));
        }
        if !(0..=BOARD_HEIGHT as i8 - 4).contains(&self.spawn_row) {
            return Err(ConfigError::SpawnRow(self.spawn_row));
        }
        if self.fall_interval_floor_ticks == 0 {
            return Err(ConfigError::ZeroFallFloor);
        }
        if self.base_fall_interval_ticks < self.fall_interval_floor_ticks {
            return Err(ConfigError::FallIntervalBelowFloor {
                base: self.base_fall_interval_ticks,
                floor: self.fall_interval_floor_ticks,
            });
        }
        if self.soft_drop_interval_ticks == 0 {
            return Err(ConfigError::ZeroSoftDropInterval);
        }
        if self.repeat_period_ms == 0 {
            return Err(ConfigError::ZeroRepeatPeriod);
        }
        Ok(())
    }
}
