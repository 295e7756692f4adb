//! Host-side tests: the visual mirror, the game view and the event log
//! driven by real sessions.

use std::collections::BTreeSet;

use crate_tetris::core::{
    GameClock, GravityOutcome, PieceState, RecordingSink, ScriptedShapes, Session, SessionConfig,
    SessionPhase, Tee, TickOutcome,
};
use crate_tetris::term::{AnchorY, EventLog, GameView, HudInfo, Viewport, VisualMirror};
use crate_tetris::types::{Cell, Command, ShapeKind, TileColor, INTERIOR_LEFT, INTERIOR_RIGHT};

fn mirror_tiles(mirror: &VisualMirror) -> BTreeSet<(u32, Cell)> {
    mirror.tiles().map(|(id, cell, _)| (id, cell)).collect()
}

fn grid_tiles(session: &Session) -> BTreeSet<(u32, Cell)> {
    session.grid().tiles().map(|(cell, id)| (id, cell)).collect()
}

#[test]
fn test_mirror_tracks_clock_driven_game() {
    let config = SessionConfig {
        seed: 7,
        ..SessionConfig::default()
    };
    let mut clock = GameClock::new(config).unwrap();
    let mut mirror = VisualMirror::new();
    let mut recorder = RecordingSink::new();

    clock.start_session(&mut Tee::new(&mut mirror, &mut recorder));
    assert_eq!(mirror.wall_count(), 64);
    assert_eq!(mirror.score_text(), "00000000");

    let pattern = [
        Command::MoveLeft,
        Command::Rotate,
        Command::MoveLeft,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::Rotate,
        Command::HardDrop,
    ];
    let mut next = 0;
    for raw in 0..30_000 {
        if raw % 13 == 0 && clock.submit(pattern[next % pattern.len()]) {
            next += 1;
        }
        let outcome = clock.tick(&mut Tee::new(&mut mirror, &mut recorder));
        if matches!(outcome, TickOutcome::Gravity(GravityOutcome::GameOver(_))) {
            break;
        }
        let session = clock.session().unwrap();
        assert_eq!(mirror_tiles(&mirror), grid_tiles(session), "raw tick {}", raw);
        assert_eq!(mirror.score_text(), session.score_text());
    }
}

#[test]
fn test_mirror_follows_line_clear() {
    let mut mirror = VisualMirror::new();
    let mut session = Session::new(8, &mut mirror);

    let grid = session.grid_mut();
    let mut id = 1000;
    for x in INTERIOR_LEFT..=INTERIOR_RIGHT {
        if x != 5 {
            grid.occupy(Cell::new(x, 20), id, TileColor::Grey, &mut mirror);
            id += 1;
        }
    }
    grid.occupy(Cell::new(8, 19), id, TileColor::Grey, &mut mirror);

    let piece = PieceState {
        id: 1,
        x: 5,
        y: 2,
        shape: ShapeKind::I,
        rotation: 0,
    };
    assert!(session.place(piece, &mut mirror));
    session.apply_command(Command::HardDrop, &mut mirror);

    assert_eq!(session.score(), 40);
    assert_eq!(mirror.score_text(), "00000040");
    assert_eq!(mirror_tiles(&mirror), grid_tiles(&session));
    assert_eq!(mirror.flashes().len(), 10);
    // The ledge tile fell into the cleared row.
    assert!(mirror.tiles().any(|(_, cell, _)| cell == Cell::new(8, 20)));
}

#[test]
fn test_blocked_spawn_shows_failed_piece() {
    let mut mirror = VisualMirror::new();
    let mut source = ScriptedShapes::repeat(ShapeKind::O);
    let mut session = Session::new(8, &mut mirror);

    while session.phase() != SessionPhase::GameOver {
        session.gravity_step(&mut source, &mut mirror);
        if session.phase() == SessionPhase::Falling {
            session.apply_command(Command::HardDrop, &mut mirror);
        }
    }

    assert!(mirror.game_over());
    // The grid keeps its 40 locked tiles; the mirror also shows the 4 that could not enter.
    assert_eq!(session.grid().tile_count(), 40);
    assert_eq!(mirror.tile_count(), 44);
}

#[test]
fn test_view_draws_session() {
    let mut mirror = VisualMirror::new();
    let mut source = ScriptedShapes::repeat(ShapeKind::T);
    let mut session = Session::new(8, &mut mirror);
    session.spawn(&mut source, &mut mirror);

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let viewport = Viewport::new(80, 24);
    let fb = view.render(&mirror, HudInfo { pieces: 1, speed: 6 }, viewport);

    for cell in session.active().unwrap().cells() {
        let (x, y) = view.cell_origin(viewport, cell);
        assert_eq!(fb.get(x, y).map(|g| g.ch), Some('█'));
    }
    let (x, y) = view.cell_origin(viewport, Cell::new(11, 21));
    assert_eq!(fb.get(x, y).map(|g| g.ch), Some('▓'));
}

#[test]
fn test_event_log_for_full_game() {
    let config = SessionConfig::default();
    let mut clock =
        GameClock::with_source(config, Box::new(ScriptedShapes::repeat(ShapeKind::O))).unwrap();
    let mut log = EventLog::new(Vec::new());

    clock.start_session(&mut log);
    for _ in 0..100_000 {
        if clock.session().unwrap().phase() == SessionPhase::Falling && clock.pending().is_none() {
            clock.submit(Command::HardDrop);
        }
        let outcome = clock.tick(&mut log);
        if outcome == TickOutcome::Idle {
            break;
        }
        log.record(&outcome, clock.session().unwrap());
    }

    let text = String::from_utf8(log.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first(), Some(&"[Session] started"));
    assert_eq!(lines.iter().filter(|l| l.starts_with("[Piece] spawned")).count(), 10);
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("[Session] locked piece")).count(),
        10
    );
    assert_eq!(
        lines.last(),
        Some(&"[Session] game over after 11 pieces, score 00000000")
    );
}
