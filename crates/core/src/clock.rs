//! Clock module - the tick-driven scheduler
//!
//! The host calls [`GameClock::tick`] once per engine frame. Only every
//! `tick_throttle`-th call is an active tick. On an active tick a latched
//! command is applied if a piece is falling; otherwise a down-counter runs and,
//! when it reaches zero, one gravity step is forced and the counter is reset
//! to the current speed. The speed is recomputed at every spawn from the
//! number of pieces spawned so far.

use crate::catalog::definition;
use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::mailbox::CommandSlot;
use crate::rng::{ShapeSource, UniformShapes};
use crate::session::{CommandOutcome, GravityOutcome, Session, SessionPhase};
use crate::sink::SessionSink;
use crate::types::Command;

/// What a single raw tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No session is running
    Idle,
    /// Not an active tick
    Throttled,
    /// Active tick spent counting down to the next forced drop
    Waiting,
    /// Active tick spent on a player command
    Command {
        command: Command,
        outcome: CommandOutcome,
    },
    /// Active tick that forced a gravity step
    Gravity(GravityOutcome),
}

pub struct GameClock {
    config: SessionConfig,
    source: Box<dyn ShapeSource>,
    session: Option<Session>,
    mailbox: CommandSlot,
    raw_ticks: u64,
    countdown: u32,
    speed: u32,
}

impl GameClock {
    /// Clock with the seeded uniform shape source
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let source = Box::new(UniformShapes::new(config.seed));
        Self::with_source(config, source)
    }

    /// Clock with a caller-provided shape source
    pub fn with_source(
        config: SessionConfig,
        source: Box<dyn ShapeSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let speed = config.initial_speed;
        Ok(Self {
            config,
            source,
            session: None,
            mailbox: CommandSlot::new(),
            raw_ticks: 0,
            countdown: speed,
            speed,
        })
    }

    /// Discard any previous session and start a fresh one
    pub fn start_session(&mut self, sink: &mut dyn SessionSink) {
        self.session = Some(Session::new(self.config.score_digits, sink));
        self.mailbox.clear();
        self.raw_ticks = 0;
        self.speed = self.config.initial_speed;
        self.countdown = self.speed;
    }

    /// Whether a session exists and has not ended
    pub fn is_running(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.phase() != SessionPhase::GameOver)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Active ticks between forced drops
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Active ticks left before the next forced drop
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn raw_ticks(&self) -> u64 {
        self.raw_ticks
    }

    pub fn pending(&self) -> Option<Command> {
        self.mailbox.peek()
    }

    /// Latch a command for the next active tick
    ///
    /// Accepted only while a piece is falling; `Rotate` is dropped for shapes
    /// with a single rotation variant. Returns whether the command was latched.
    pub fn submit(&mut self, command: Command) -> bool {
        let Some(active) = self.session.as_ref().and_then(|s| s.active()) else {
            return false;
        };
        if command == Command::Rotate && !definition(active.shape).rotates() {
            return false;
        }
        self.mailbox.latch(command);
        true
    }

    /// Advance one raw engine tick
    pub fn tick(&mut self, sink: &mut dyn SessionSink) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        self.raw_ticks += 1;
        if self.raw_ticks % self.config.tick_throttle as u64 != 0 {
            return TickOutcome::Throttled;
        }

        self.active_tick(sink)
    }

    fn active_tick(&mut self, sink: &mut dyn SessionSink) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Idle;
        };

        if session.phase() == SessionPhase::Falling {
            if let Some(command) = self.mailbox.take() {
                let outcome = session.apply_command(command, sink);
                return TickOutcome::Command { command, outcome };
            }
        }

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return TickOutcome::Waiting;
        }

        if session.phase() == SessionPhase::NoPiece {
            self.speed = self.config.speed_for(session.spawned_count());
        }
        let outcome = session.gravity_step(self.source.as_mut(), sink);
        self.countdown = self.speed;

        if let GravityOutcome::GameOver(_) = outcome {
            self.mailbox.clear();
        }
        TickOutcome::Gravity(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedShapes;
    use crate::sink::NullSink;
    use crate::types::ShapeKind;

    fn clock(shape: ShapeKind) -> GameClock {
        GameClock::with_source(
            SessionConfig::default(),
            Box::new(ScriptedShapes::repeat(shape)),
        )
        .unwrap()
    }

    #[test]
    fn test_idle_before_start() {
        let mut clock = clock(ShapeKind::T);
        assert!(!clock.is_running());
        assert_eq!(clock.tick(&mut NullSink), TickOutcome::Idle);
        assert_eq!(clock.raw_ticks(), 0);
        assert!(!clock.submit(Command::MoveLeft));
    }

    #[test]
    fn test_only_every_sixth_tick_is_active() {
        let mut clock = clock(ShapeKind::T);
        clock.start_session(&mut NullSink);

        for _ in 0..5 {
            assert_eq!(clock.tick(&mut NullSink), TickOutcome::Throttled);
        }
        assert_eq!(clock.tick(&mut NullSink), TickOutcome::Waiting);
        assert_eq!(clock.countdown(), 5);
    }

    #[test]
    fn test_first_spawn_after_initial_countdown() {
        let mut clock = clock(ShapeKind::T);
        clock.start_session(&mut NullSink);

        // 6 active ticks * 6 raw ticks.
        let mut outcomes = Vec::new();
        for _ in 0..36 {
            outcomes.push(clock.tick(&mut NullSink));
        }
        assert!(matches!(
            outcomes.last(),
            Some(TickOutcome::Gravity(GravityOutcome::Spawned(_)))
        ));
        assert_eq!(clock.countdown(), 6);
    }

    #[test]
    fn test_submit_requires_falling_piece() {
        let mut clock = clock(ShapeKind::O);
        clock.start_session(&mut NullSink);
        assert!(!clock.submit(Command::MoveLeft));

        for _ in 0..36 {
            clock.tick(&mut NullSink);
        }
        assert!(clock.submit(Command::MoveLeft));
        // O has a single rotation variant.
        assert!(!clock.submit(Command::Rotate));
        assert_eq!(clock.pending(), Some(Command::MoveLeft));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SessionConfig {
            tick_throttle: 0,
            ..SessionConfig::default()
        };
        assert!(GameClock::new(config).is_err());
    }
}
