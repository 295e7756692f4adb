//! Terminal runner (default binary).
//!
//! Interactive mode draws the session with crossterm and the framebuffer
//! renderer. `--headless` drives the clock with a seeded command stream and
//! logs to stdout instead.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use crate_tetris::core::{GameClock, SessionConfig, SimpleRng, Tee, TickOutcome};
use crate_tetris::input::{handle_key_event, should_quit, KeyAction};
use crate_tetris::term::{
    EventLog, FrameBuffer, GameView, HudInfo, TerminalRenderer, Viewport, VisualMirror,
};
use crate_tetris::types::{Command, RAW_TICK_MS};

/// Falling-block puzzle on a 12x22 walled grid.
#[derive(Debug, Parser)]
#[command(
    name = "crate-tetris",
    version,
    about = "Falling-block puzzle on a 12x22 walled grid.",
    long_about = "Falling-block puzzle on a 12x22 walled grid.\n\n\
        CONTROLS:\n  Left/Right (a/d, h/l)  Move    Up (w/k)  Rotate\n  \
        Down/Space (s/j)      Hard drop\n  Enter/f  Start a session, or dump the grid to the log\n  \
        q / Ctrl-C  Quit"
)]
struct Args {
    /// JSON config file; missing fields keep their defaults.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the shape source (overrides config and CRATE_TETRIS_SEED).
    #[arg(short, long, value_name = "N")]
    seed: Option<u32>,

    /// Raw ticks per active tick (overrides config and CRATE_TETRIS_TICK_THROTTLE).
    #[arg(long, value_name = "N")]
    tick_throttle: Option<u32>,

    /// Run without a terminal UI, feeding random commands.
    #[arg(long)]
    headless: bool,

    /// Raw ticks to run in headless mode.
    #[arg(long, default_value = "20000", value_name = "N")]
    ticks: u64,

    /// Write session events to this file in interactive mode.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => SessionConfig::default(),
        }
        .with_env();

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(throttle) = self.tick_throttle {
            config.tick_throttle = throttle;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.session_config()?;

    if args.headless {
        return run_headless(config, args.ticks);
    }

    let log: Box<dyn Write> = match &args.log_file {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::sink()),
    };

    let mut term = TerminalRenderer::enter()?;
    let result = run(&mut term, config, EventLog::new(log));
    // Restore the terminal before any error is printed.
    drop(term);
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: SessionConfig,
    mut log: EventLog<Box<dyn Write>>,
) -> Result<()> {
    let mut clock = GameClock::new(config)?;
    let mut mirror = VisualMirror::new();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(u64::from(RAW_TICK_MS));

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = HudInfo {
            pieces: clock.session().map_or(0, |s| s.spawned_count()),
            speed: clock.speed(),
        };
        view.render_into(&mirror, hud, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        break;
                    }
                    match handle_key_event(key) {
                        Some(KeyAction::Command(command)) => {
                            clock.submit(command);
                        }
                        Some(KeyAction::Fire) => {
                            if clock.is_running() {
                                if let Some(session) = clock.session() {
                                    log.dump(session);
                                }
                            } else {
                                clock.start_session(&mut Tee::new(&mut mirror, &mut log));
                            }
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            mirror.advance(elapsed.as_secs_f32());

            let outcome = clock.tick(&mut Tee::new(&mut mirror, &mut log));
            if let Some(session) = clock.session() {
                log.record(&outcome, session);
            }
        }
    }

    log.flush()?;
    if let Some(e) = log.take_error() {
        return Err(e).context("writing the event log");
    }
    Ok(())
}

fn run_headless(config: SessionConfig, ticks: u64) -> Result<()> {
    let seed = config.seed;
    let mut clock = GameClock::new(config)?;
    let mut log = EventLog::new(io::stdout().lock());
    // Separate stream so the command pattern does not shift the shape sequence.
    let mut commands = SimpleRng::new(seed ^ 0x5bd1_e995);

    clock.start_session(&mut log);
    for _ in 0..ticks {
        if commands.next_range(8) == 0 {
            let command = Command::ALL[commands.next_range(Command::ALL.len() as u32) as usize];
            clock.submit(command);
        }

        let outcome = clock.tick(&mut log);
        if let Some(session) = clock.session() {
            log.record(&outcome, session);
        }
        if outcome == TickOutcome::Idle {
            break;
        }
    }

    if let Some(session) = clock.session() {
        log.dump(session);
        log.note(&format!(
            "{} raw ticks, {} pieces, score {}",
            clock.raw_ticks(),
            session.spawned_count(),
            session.score_text()
        ));
    }
    log.flush()?;
    if let Some(e) = log.take_error() {
        return Err(e).context("writing to stdout");
    }
    Ok(())
}
