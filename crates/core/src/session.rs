//! Game session - owns and drives one game
//!
//! This module ties together the board, the active piece, the randomizer,
//! scoring, input repeat timing and the cosmetic compaction queue. The
//! surrounding application only needs four entry points: [`GameSession::start`],
//! [`GameSession::tick`], [`GameSession::handle_input`] and [`GameSession::reset`].

use tracing::{debug, info};

use crate::board::Board;
use crate::clock::{Clock, MonotonicClock};
use crate::compaction::CompactionQueue;
use crate::config::{ConfigError, SessionConfig};
use crate::piece::{ActivePiece, GravityOutcome};
use crate::repeat::{AutoRepeat, Direction};
use crate::rng::PieceRandomizer;
use crate::scoring::ScoreKeeper;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{InputEvent, KeyState, LockEvent, PieceKind};

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession<C: Clock = MonotonicClock> {
    config: SessionConfig,
    clock: C,
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    hold: Option<PieceKind>,
    randomizer: PieceRandomizer,
    scoring: ScoreKeeper,
    compaction: CompactionQueue,
    repeat: AutoRepeat,
    soft_drop_held: bool,
    /// Ticks since the last gravity step
    fall_ticks: u32,
    last_hold_ms: Option<u64>,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    started: bool,
    paused: bool,
    game_over: bool,
}

impl GameSession<MonotonicClock> {
    /// Create a session timed by the wall clock
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> GameSession<C> {
    /// Create a session with an explicit time source
    pub fn with_clock(config: SessionConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut randomizer = PieceRandomizer::new(config.seed);
        let next = randomizer.draw();

        Ok(Self {
            board: Board::new(),
            active: None,
            next,
            hold: None,
            randomizer,
            scoring: ScoreKeeper::new(
                config.base_fall_interval_ticks,
                config.fall_interval_floor_ticks,
            ),
            compaction: CompactionQueue::new(),
            repeat: AutoRepeat::with_config(
                config.repeat_initial_delay_ms,
                config.repeat_period_ms,
            ),
            soft_drop_held: false,
            fall_ticks: 0,
            last_hold_ms: None,
            last_event: None,
            episode_id: 0,
            started: false,
            paused: false,
            game_over: false,
            config,
            clock,
        })
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        debug!(episode = self.episode_id, seed = self.config.seed, "game started");
        self.spawn_next();
    }

    /// Discard the current game and start a fresh one
    ///
    /// The piece sequence continues from the current RNG state, so a reset
    /// does not replay the same pieces.
    pub fn reset(&mut self) {
        info!(
            episode = self.episode_id,
            score = self.score(),
            lines = self.lines(),
            "game reset"
        );

        self.board.clear();
        self.active = None;
        self.hold = None;
        self.scoring = ScoreKeeper::new(
            self.config.base_fall_interval_ticks,
            self.config.fall_interval_floor_ticks,
        );
        self.compaction.clear();
        self.repeat.reset();
        self.soft_drop_held = false;
        self.fall_ticks = 0;
        self.last_hold_ms = None;
        self.last_event = None;
        self.paused = false;
        self.game_over = false;
        self.started = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.next = self.randomizer.draw();

        self.start();
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Gravity, locking and movement only run while this holds
    pub fn playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn fall_interval_ticks(&self) -> u32 {
        self.scoring.fall_interval_ticks()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn can_hold(&self) -> bool {
        self.active.is_some_and(|p| p.held_eligible())
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn compaction(&self) -> &CompactionQueue {
        &self.compaction
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Origin row the active piece would land on after a hard drop
    pub fn shadow_row(&self) -> Option<i8> {
        self.active.map(|p| p.shadow_row(&self.board))
    }

    /// Ticks per gravity step right now, including the soft drop override
    pub fn effective_fall_interval(&self) -> u32 {
        if self.soft_drop_held {
            self.config.soft_drop_interval_ticks
        } else {
            self.scoring.fall_interval_ticks()
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.shadow_row = self.shadow_row();
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold();
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.score = self.scoring.score();
        out.level = self.scoring.level();
        out.lines = self.scoring.lines();
        out.fall_interval_ticks = self.scoring.fall_interval_ticks();
        out.row_offsets.clear();
        out.row_offsets.extend(self.compaction.pending().copied());
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the lookahead piece and draw a new lookahead
    fn spawn_next(&mut self) -> bool {
        let kind = self.next;
        self.next = self.randomizer.draw();
        self.spawn(kind)
    }

    /// Place a fresh piece at the spawn origin; a blocked spawn ends the game
    fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::spawn(kind, self.config.spawn());

        if self.board.would_collide(&piece.cells()) {
            self.active = None;
            self.game_over = true;
            info!(
                piece = kind.as_str(),
                score = self.score(),
                lines = self.lines(),
                "game over: spawn blocked"
            );
            return false;
        }

        debug!(piece = kind.as_str(), next = self.next.as_str(), "spawned");
        self.active = Some(piece);
        true
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dc: i8, dr: i8) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.try_move(&self.board, dc, dr),
            None => false,
        }
    }

    /// Try to rotate the active piece clockwise
    pub(crate) fn try_rotate(&mut self) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.try_rotate(&self.board),
            None => false,
        }
    }

    /// One gravity step: fall, lock, or end the game if the piece never fell
    pub(crate) fn gravity_step(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        match piece.gravity_step(&self.board) {
            GravityOutcome::Fell => {}
            GravityOutcome::Landed => self.lock_piece(),
            GravityOutcome::Stuck => {
                self.game_over = true;
                info!(
                    piece = piece.kind.as_str(),
                    score = self.scoring.score(),
                    lines = self.scoring.lines(),
                    "game over: piece could not fall"
                );
            }
        }
        true
    }

    /// Drop the active piece to its landing row and lock it
    pub(crate) fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let distance = piece.hard_drop(&self.board);
        debug!(piece = piece.kind.as_str(), distance, "hard drop");
        self.lock_piece();
        true
    }

    /// Stash the active piece, or swap it with the held one
    pub fn hold(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !active.held_eligible() {
            return false;
        }

        match self.hold.replace(active.kind) {
            None => {
                self.spawn_next();
            }
            Some(held) => {
                // The lookahead is redrawn against the swapped-in kind.
                self.next = self.randomizer.draw_after(held);
                self.spawn(held);
            }
        }

        if let Some(piece) = self.active.as_mut() {
            piece.revoke_hold();
        }

        debug!(held = active.kind.as_str(), "hold");
        true
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.commit(piece.blocks());

        let cleared = self.board.clear_completed_lines();
        self.compaction.push_cleared(&cleared);

        let award = self.scoring.record_clear(cleared.len() as u32);
        if award.levels_gained > 0 {
            info!(
                level = self.scoring.level(),
                fall_interval = self.scoring.fall_interval_ticks(),
                "level up"
            );
        }

        debug!(
            piece = piece.kind.as_str(),
            lines = award.lines,
            points = award.points,
            score = self.scoring.score(),
            "locked"
        );

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: award.lines,
            points_awarded: award.points,
            levels_gained: award.levels_gained,
        });

        self.spawn_next();
    }

    /// Advance one frame
    ///
    /// Returns true if the active piece fell, locked or ended the game.
    pub fn tick(&mut self) -> bool {
        self.compaction.step();

        if !self.playable() {
            return false;
        }

        let now = self.clock.now_ms();
        self.apply_repeats(now);
        if !self.playable() {
            return false;
        }

        self.fall_ticks += 1;
        if self.fall_ticks < self.effective_fall_interval() {
            return false;
        }
        self.fall_ticks = 0;
        self.gravity_step()
    }

    fn apply_repeats(&mut self, now_ms: u64) {
        let burst = self.repeat.poll(now_ms);
        for _ in 0..burst.left {
            self.try_move(Direction::Left.delta(), 0);
        }
        for _ in 0..burst.right {
            self.try_move(Direction::Right.delta(), 0);
        }
    }

    /// Apply an input event, timed by the session clock
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let now = self.clock.now_ms();
        self.handle_input_at(event, now)
    }

    /// Apply an input event stamped with a monotonic time in milliseconds
    ///
    /// Invalid or ill-timed inputs are ignored and return false.
    pub fn handle_input_at(&mut self, event: InputEvent, at_ms: u64) -> bool {
        match event {
            InputEvent::Reset => {
                self.reset();
                return true;
            }
            InputEvent::Pause => {
                if !self.started || self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                // Held keys do not carry across a pause.
                self.repeat.reset();
                self.soft_drop_held = false;
                debug!(paused = self.paused, "pause toggled");
                return true;
            }
            // Releases always land so a key let go while paused is not stuck.
            InputEvent::MoveLeft(KeyState::Released) => {
                self.repeat.release(Direction::Left);
                return true;
            }
            InputEvent::MoveRight(KeyState::Released) => {
                self.repeat.release(Direction::Right);
                return true;
            }
            InputEvent::SoftDrop(KeyState::Released) => {
                self.soft_drop_held = false;
                return true;
            }
            _ => {}
        }

        if !self.playable() {
            return false;
        }

        match event {
            InputEvent::MoveLeft(_) => {
                self.repeat.press(Direction::Left, at_ms) && self.try_move(-1, 0)
            }
            InputEvent::MoveRight(_) => {
                self.repeat.press(Direction::Right, at_ms) && self.try_move(1, 0)
            }
            InputEvent::RotateCw => self.try_rotate(),
            InputEvent::SoftDrop(_) => {
                self.soft_drop_held = true;
                true
            }
            InputEvent::HardDrop => self.hard_drop(),
            InputEvent::Hold => {
                let cooling = self
                    .last_hold_ms
                    .is_some_and(|t| at_ms.saturating_sub(t) < self.config.hold_cooldown_ms as u64);
                if cooling {
                    return false;
                }
                self.last_hold_ms = Some(at_ms);
                self.hold()
            }
            InputEvent::Pause | InputEvent::Reset => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, SPAWN_COL, SPAWN_ROW};

    const BOTTOM: i8 = BOARD_HEIGHT as i8 - 1;

    fn session() -> GameSession<ManualClock> {
        GameSession::with_clock(SessionConfig::default().with_seed(12345), ManualClock::new(0))
            .unwrap()
    }

    fn started() -> GameSession<ManualClock> {
        let mut s = session();
        s.start();
        s
    }

    /// Replace the active piece with a fresh one of `kind`
    fn force_active(s: &mut GameSession<ManualClock>, kind: PieceKind) {
        s.active = Some(ActivePiece::spawn(kind, s.config.spawn()));
    }

    fn tick_n(s: &mut GameSession<ManualClock>, n: u32) {
        for _ in 0..n {
            s.tick();
        }
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert!(!s.started);
        assert!(!s.game_over);
        assert!(!s.paused);
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.lines(), 0);
        assert!(s.active.is_none());
        assert!(s.hold.is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cfg = SessionConfig::default().with_fall_interval(0);
        assert!(GameSession::with_clock(cfg, ManualClock::new(0)).is_err());
    }

    #[test]
    fn test_start_spawns_lookahead_piece() {
        let mut s = session();
        let lookahead = s.next;
        s.start();
        let active = s.active.unwrap();
        assert_eq!(active.kind, lookahead);
        assert_eq!(active.origin(), (SPAWN_COL, SPAWN_ROW));
        assert!(active.held_eligible());

        // Starting twice does nothing.
        s.start();
        assert_eq!(s.active.unwrap(), active);
    }

    #[test]
    fn test_tick_before_start_does_nothing() {
        let mut s = session();
        assert!(!s.tick());
        assert!(s.active.is_none());
    }

    #[test]
    fn test_gravity_follows_fall_interval() {
        let mut s = started();
        force_active(&mut s, PieceKind::O);
        let interval = s.fall_interval_ticks();

        tick_n(&mut s, interval - 1);
        assert_eq!(s.active.unwrap().row, SPAWN_ROW);
        assert!(s.tick());
        assert_eq!(s.active.unwrap().row, SPAWN_ROW + 1);
    }

    #[test]
    fn test_soft_drop_overrides_interval() {
        let mut s = started();
        force_active(&mut s, PieceKind::O);
        assert!(s.handle_input(InputEvent::SoftDrop(KeyState::Pressed)));
        assert_eq!(s.effective_fall_interval(), 2);

        tick_n(&mut s, 4);
        assert_eq!(s.active.unwrap().row, SPAWN_ROW + 2);

        s.handle_input(InputEvent::SoftDrop(KeyState::Released));
        assert_eq!(s.effective_fall_interval(), s.fall_interval_ticks());
    }

    #[test]
    fn test_gravity_locks_after_falling() {
        let mut s = started();
        force_active(&mut s, PieceKind::O);
        let next = s.next;

        // Fall to the floor, then one more step locks.
        for _ in 0..BOTTOM - 1 {
            assert!(s.gravity_step());
        }
        assert_eq!(s.active.unwrap().row, BOTTOM - 1);
        assert!(s.gravity_step());

        assert_eq!(s.board.block_count(), 4);
        assert_eq!(s.active.unwrap().kind, next);
        let event = s.take_last_event().unwrap();
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.lines_cleared, 0);
        assert!(!s.game_over);
    }

    #[test]
    fn test_piece_that_never_fell_ends_game() {
        let mut s = started();
        force_active(&mut s, PieceKind::O);
        // Block the cells right below the O at spawn.
        s.board.set(4, 2, Some(PieceKind::I));

        s.gravity_step();
        assert!(s.game_over);
        // The stuck piece is not committed.
        assert_eq!(s.board.block_count(), 1);

        // Gravity is suspended.
        let before = s.active;
        tick_n(&mut s, 100);
        assert_eq!(s.active, before);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut s = started();
        for col in 0..BOARD_WIDTH as i8 {
            s.board.set(col, 1, Some(PieceKind::Z));
        }
        s.active = None;
        assert!(!s.spawn(PieceKind::T));
        assert!(s.game_over);
        assert!(s.active.is_none());
        assert!(!s.tick());
        assert!(!s.handle_input(InputEvent::HardDrop));
    }

    #[test]
    fn test_hard_drop_locks_immediately() {
        let mut s = started();
        force_active(&mut s, PieceKind::I);
        assert!(s.handle_input(InputEvent::HardDrop));
        // I lies flat on box row 1, so it lands on the bottom row.
        for col in 3..7 {
            assert_eq!(s.board.get(col, BOTTOM), Some(Some(PieceKind::I)));
        }
        assert!(s.active.is_some());
    }

    #[test]
    fn test_single_line_clear_scores_100() {
        let mut s = started();
        s.board.fill_row_except(BOTTOM, &[3, 4, 5, 6], PieceKind::J);
        force_active(&mut s, PieceKind::I);

        s.hard_drop();
        assert_eq!(s.lines(), 1);
        assert_eq!(s.score(), 100);
        assert!(s.board.is_empty());
        assert_eq!(s.compaction.len(), 1);
        assert_eq!(s.take_last_event().map(|e| e.points_awarded), Some(100));
    }

    #[test]
    fn test_double_line_clear_scores_400() {
        let mut s = started();
        s.board.fill_row_except(BOTTOM, &[4, 5], PieceKind::J);
        s.board.fill_row_except(BOTTOM - 1, &[4, 5], PieceKind::L);
        force_active(&mut s, PieceKind::O);

        s.hard_drop();
        assert_eq!(s.lines(), 2);
        assert_eq!(s.score(), 400);
        assert!(s.board.is_empty());
    }

    #[test]
    fn test_level_up_after_five_lines() {
        let mut s = started();
        for _ in 0..5 {
            s.board.fill_row_except(BOTTOM, &[3, 4, 5, 6], PieceKind::J);
            force_active(&mut s, PieceKind::I);
            s.hard_drop();
        }
        assert_eq!(s.lines(), 5);
        assert_eq!(s.level(), 2);
        assert_eq!(s.fall_interval_ticks(), 13);
        assert_eq!(s.score(), 500);
    }

    #[test]
    fn test_hold_stores_then_swaps() {
        let mut s = started();
        force_active(&mut s, PieceKind::T);
        let lookahead = s.next;

        assert!(s.hold());
        assert_eq!(s.hold, Some(PieceKind::T));
        assert_eq!(s.active.unwrap().kind, lookahead);
        assert!(!s.can_hold());

        // Second hold in the same drop cycle is ignored.
        let before = (s.active, s.hold, s.next);
        assert!(!s.hold());
        assert_eq!((s.active, s.hold, s.next), before);

        // After a lock, hold swaps with the stored T at the spawn origin.
        s.hard_drop();
        let current = s.active.unwrap().kind;
        assert!(s.hold());
        let active = s.active.unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(active.origin(), (SPAWN_COL, SPAWN_ROW));
        assert_eq!(s.hold, Some(current));
    }

    #[test]
    fn test_hold_swap_redraws_lookahead() {
        let mut s = started();
        force_active(&mut s, PieceKind::T);
        let lookahead = s.next;

        // Storing spawns the lookahead and draws a new one as usual.
        s.hold();
        assert_eq!(s.active.unwrap().kind, lookahead);

        s.hard_drop();
        let current = s.active.unwrap().kind;
        let mut expected = s.randomizer.clone();
        let rng_before = s.randomizer.state();

        assert!(s.hold());
        assert_eq!(s.active.unwrap().kind, PieceKind::T);
        assert_eq!(s.hold, Some(current));
        assert_ne!(s.randomizer.state(), rng_before);
        assert_eq!(s.next, expected.draw_after(PieceKind::T));
        assert_eq!(s.randomizer.last(), Some(s.next));
    }

    #[test]
    fn test_hold_store_keeps_lookahead_order() {
        let mut s = started();
        force_active(&mut s, PieceKind::T);
        let lookahead = s.next;
        let mut expected = s.randomizer.clone();

        assert!(s.hold());
        // The stored hold consumes the lookahead exactly like a lock would.
        assert_eq!(s.active.unwrap().kind, lookahead);
        assert_eq!(s.next, expected.draw());
    }

    #[test]
    fn test_multi_line_clear_lifts_stack_evenly() {
        let mut s = started();
        s.board.fill_row_except(BOTTOM, &[4, 5], PieceKind::J);
        s.board.fill_row_except(BOTTOM - 1, &[4, 5], PieceKind::L);
        s.board.set(0, BOTTOM - 2, Some(PieceKind::T));
        s.board.set(0, BOTTOM - 3, Some(PieceKind::S));
        force_active(&mut s, PieceKind::O);

        s.hard_drop();
        assert_eq!(s.lines(), 2);
        assert_eq!(s.board.get(0, BOTTOM), Some(Some(PieceKind::T)));
        assert_eq!(s.board.get(0, BOTTOM - 1), Some(Some(PieceKind::S)));

        let snap = s.snapshot();
        let lift_t = snap.row_offset_px(BOTTOM as u8);
        let lift_s = snap.row_offset_px(BOTTOM as u8 - 1);
        assert_eq!(lift_t, 2 * crate::types::CELL_PX);
        assert_eq!(lift_t, lift_s);
    }

    #[test]
    fn test_hold_input_is_debounced() {
        let mut s = started();
        force_active(&mut s, PieceKind::T);
        assert!(s.handle_input_at(InputEvent::Hold, 1_000));
        s.hard_drop();

        // Eligible again, but within the cooldown window.
        assert!(!s.handle_input_at(InputEvent::Hold, 1_150));
        assert!(s.handle_input_at(InputEvent::Hold, 1_200));
    }

    #[test]
    fn test_move_input_repeats_while_held() {
        let mut s = started();
        force_active(&mut s, PieceKind::O);
        let col = s.active.unwrap().col;

        assert!(s.handle_input(InputEvent::MoveLeft(KeyState::Pressed)));
        assert_eq!(s.active.unwrap().col, col - 1);

        s.clock.advance(199);
        s.tick();
        assert_eq!(s.active.unwrap().col, col - 1);

        s.clock.advance(1);
        s.tick();
        assert_eq!(s.active.unwrap().col, col - 2);

        s.clock.advance(100);
        s.tick();
        assert_eq!(s.active.unwrap().col, col - 4);

        s.handle_input(InputEvent::MoveLeft(KeyState::Released));
        s.clock.advance(500);
        s.tick();
        assert_eq!(s.active.unwrap().col, col - 4);
    }

    #[test]
    fn test_pause_freezes_gravity_and_input() {
        let mut s = started();
        force_active(&mut s, PieceKind::O);
        assert!(s.handle_input(InputEvent::Pause));
        assert!(s.paused());

        tick_n(&mut s, 100);
        assert_eq!(s.active.unwrap().row, SPAWN_ROW);
        assert!(!s.handle_input(InputEvent::RotateCw));
        assert!(!s.handle_input(InputEvent::HardDrop));

        assert!(s.handle_input(InputEvent::Pause));
        assert!(!s.paused());
    }

    #[test]
    fn test_compaction_runs_while_paused() {
        let mut s = started();
        s.board.fill_row_except(BOTTOM, &[3, 4, 5, 6], PieceKind::J);
        force_active(&mut s, PieceKind::I);
        s.hard_drop();
        assert!(!s.compaction.is_idle());

        s.handle_input(InputEvent::Pause);
        tick_n(&mut s, 6);
        assert!(s.compaction.is_idle());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut s = started();
        s.board.fill_row_except(BOTTOM, &[3, 4, 5, 6], PieceKind::J);
        force_active(&mut s, PieceKind::I);
        s.hard_drop();
        s.hold();
        s.handle_input(InputEvent::SoftDrop(KeyState::Pressed));
        let episode = s.episode_id;

        assert!(s.handle_input(InputEvent::Reset));
        assert!(s.board.is_empty());
        assert_eq!((s.score(), s.level(), s.lines()), (0, 1, 0));
        assert!(s.hold.is_none());
        assert!(s.active.is_some());
        assert!(!s.game_over);
        assert!(!s.soft_drop_held);
        assert!(s.compaction.is_idle());
        assert_eq!(s.episode_id, episode + 1);
    }

    #[test]
    fn test_reset_leaves_game_over() {
        let mut s = started();
        force_active(&mut s, PieceKind::O);
        s.board.set(4, 2, Some(PieceKind::I));
        s.gravity_step();
        assert!(s.game_over);
        assert!(!s.handle_input(InputEvent::Pause));

        s.handle_input(InputEvent::Reset);
        assert!(!s.game_over);
        assert!(s.playable());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut s = started();
        force_active(&mut s, PieceKind::O);
        s.board.set(0, BOTTOM, Some(PieceKind::L));

        let snap = s.snapshot();
        assert_eq!(snap.board[BOTTOM as usize][0], PieceKind::L.code());
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::O);
        assert_eq!(active.cells, s.active.unwrap().cells());
        assert_eq!(snap.shadow_row, Some(BOTTOM - 1));
        assert_eq!(snap.next, s.next);
        assert!(snap.can_hold);
        assert!(snap.playable());
        assert_eq!(snap.level, 1);
        assert!(snap.row_offsets.is_empty());
    }
}
