//! Terminal runner (default binary).
//!
//! Drives one game session at a fixed 16 ms tick. Input is read from
//! crossterm between ticks and rendered through the framebuffer renderer.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info, Level};

use stackfall::core::clock::{Clock, MonotonicClock};
use stackfall::core::{GameSession, GameSnapshot, SessionConfig};
use stackfall::input::{should_quit, KeyTracker};
use stackfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use stackfall::types::TICK_MS;

#[derive(Debug, Parser)]
#[command(name = "stackfall", version, about = "Falling-block puzzle game for the terminal")]
struct Args {
    /// Seed for the piece sequence (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Starting gravity interval in 16 ms ticks
    #[arg(long, value_name = "TICKS")]
    fall_interval: Option<u32>,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut config = SessionConfig::default().with_seed(args.seed.unwrap_or_else(rand::random));
    if let Some(ticks) = args.fall_interval {
        config = config.with_fall_interval(ticks);
    }
    let clock = MonotonicClock::new();
    let game = GameSession::with_clock(config, clock).context("invalid game configuration")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    info!(
        seed = game.config().seed,
        key_releases = term.keyboard_enhanced(),
        "session started"
    );

    let result = run(&mut term, game, clock);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    mut game: GameSession<MonotonicClock>,
    clock: MonotonicClock,
) -> Result<()> {
    game.start();

    let view = GameView::default();
    let mut keys = KeyTracker::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = game.score(), lines = game.lines(), "quit");
                        return Ok(());
                    }
                    for input in keys.handle_key(key, clock.now_ms()) {
                        game.handle_input(input);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for input in keys.expire(clock.now_ms()) {
                game.handle_input(input);
            }
            game.tick();

            if let Some(lock) = game.take_last_event() {
                debug!(
                    piece = lock.kind.as_str(),
                    lines = lock.lines_cleared,
                    points = lock.points_awarded,
                    "lock event"
                );
            }
        }
    }
}
