//! Session module - one game's complete state
//!
//! A [`Session`] bundles the grid, the piece controller and the score. It is
//! created fresh at every session start and mutated only through the
//! operations below, which the clock calls from its active-tick handler.

use crate::grid::GridState;
use crate::line_clear::{check_full_rows, remove_rows};
use crate::piece::{PieceController, PieceState, SpawnOutcome};
use crate::rng::ShapeSource;
use crate::scoring::ScoreTracker;
use crate::sink::SessionSink;
use crate::types::{Command, Direction};

/// Where the session is in the piece lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the next gravity step to spawn a piece
    NoPiece,
    /// A piece is live
    Falling,
    /// A spawn was blocked; terminal until a new session starts
    GameOver,
}

/// What happened when a piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub piece: PieceState,
    pub rows_cleared: usize,
    pub points: u32,
}

/// Result of applying a player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The piece moved or rotated
    Moved,
    /// The move was illegal; nothing changed
    Rejected,
    /// Hard drop: the piece fell and locked
    Locked(LockReport),
    /// No piece is falling
    Ignored,
}

/// Result of one forced gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityOutcome {
    Spawned(PieceState),
    /// The new piece had no room
    GameOver(PieceState),
    Fell,
    Locked(LockReport),
    /// The session is already over
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    grid: GridState,
    pieces: PieceController,
    score: ScoreTracker,
    game_over: bool,
}

impl Session {
    /// Start a session: notify the sink, raise the walls, show a zero score
    pub fn new(score_digits: usize, sink: &mut dyn SessionSink) -> Self {
        sink.on_session_start();
        let grid = GridState::new(sink);
        let score = ScoreTracker::new(score_digits);
        score.announce(sink);

        Self {
            grid,
            pieces: PieceController::new(),
            score,
            game_over: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.game_over {
            SessionPhase::GameOver
        } else if self.pieces.active().is_some() {
            SessionPhase::Falling
        } else {
            SessionPhase::NoPiece
        }
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Mutable grid access for scripted setups (seeding terrain in tests and demos)
    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    pub fn active(&self) -> Option<PieceState> {
        self.pieces.active()
    }

    pub fn score(&self) -> u32 {
        self.score.total()
    }

    pub fn score_text(&self) -> String {
        self.score.text()
    }

    pub fn spawned_count(&self) -> u32 {
        self.pieces.spawned_count()
    }

    pub fn dump(&self) -> String {
        self.grid.dump()
    }

    /// Spawn the next piece; `None` unless the session is waiting for one
    pub fn spawn(
        &mut self,
        source: &mut dyn ShapeSource,
        sink: &mut dyn SessionSink,
    ) -> Option<SpawnOutcome> {
        if self.phase() != SessionPhase::NoPiece {
            return None;
        }

        let outcome = self.pieces.spawn(&mut self.grid, source, sink);
        if let SpawnOutcome::Blocked(_) = outcome {
            self.game_over = true;
            sink.on_game_over();
        }
        Some(outcome)
    }

    /// Put a specific piece into play (scripted setups)
    pub fn place(&mut self, piece: PieceState, sink: &mut dyn SessionSink) -> bool {
        if self.phase() != SessionPhase::NoPiece {
            return false;
        }
        self.pieces.place(piece, &mut self.grid, sink)
    }

    /// Apply a player command to the falling piece
    pub fn apply_command(&mut self, command: Command, sink: &mut dyn SessionSink) -> CommandOutcome {
        if self.phase() != SessionPhase::Falling {
            return CommandOutcome::Ignored;
        }

        let moved = match command {
            Command::MoveLeft => self.pieces.shift(Direction::Left, &mut self.grid, sink),
            Command::MoveRight => self.pieces.shift(Direction::Right, &mut self.grid, sink),
            Command::Rotate => self.pieces.rotate(&mut self.grid, sink),
            Command::HardDrop => {
                self.pieces.hard_drop(&mut self.grid, sink);
                return match self.lock_active(sink) {
                    Some(report) => CommandOutcome::Locked(report),
                    None => CommandOutcome::Ignored,
                };
            }
        };

        if moved {
            CommandOutcome::Moved
        } else {
            CommandOutcome::Rejected
        }
    }

    /// One forced drop: spawn when idle, otherwise fall one row or lock
    pub fn gravity_step(
        &mut self,
        source: &mut dyn ShapeSource,
        sink: &mut dyn SessionSink,
    ) -> GravityOutcome {
        match self.phase() {
            SessionPhase::GameOver => GravityOutcome::Ignored,
            SessionPhase::NoPiece => match self.spawn(source, sink) {
                Some(SpawnOutcome::Spawned(piece)) => GravityOutcome::Spawned(piece),
                Some(SpawnOutcome::Blocked(piece)) => GravityOutcome::GameOver(piece),
                None => GravityOutcome::Ignored,
            },
            SessionPhase::Falling => {
                if self.pieces.shift(Direction::Down, &mut self.grid, sink) {
                    return GravityOutcome::Fell;
                }
                match self.lock_active(sink) {
                    Some(report) => GravityOutcome::Locked(report),
                    None => GravityOutcome::Ignored,
                }
            }
        }
    }

    /// Lock the falling piece, clear full rows and score them
    pub fn lock_active(&mut self, sink: &mut dyn SessionSink) -> Option<LockReport> {
        let piece = self.pieces.lock(&mut self.grid, sink)?;

        let rows = check_full_rows(&self.grid);
        let (rows_cleared, points) = if rows.is_empty() {
            (0, 0)
        } else {
            let cleared = remove_rows(&mut self.grid, &rows, sink);
            (cleared, self.score.add_score(cleared, sink))
        };

        Some(LockReport {
            piece,
            rows_cleared,
            points,
        })
    }
}
