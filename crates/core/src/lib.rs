//! Core rules engine - pure, deterministic, and testable
//!
//! Everything needed to run a falling-block session on a 12x22 walled grid:
//! piece shapes, collision, line clearing, scoring and the tick-driven clock.
//! Nothing in here touches a terminal or a file handle except
//! [`SessionConfig::load`]. Every visible change is reported through a
//! [`SessionSink`], so the host decides how to draw and what to log.
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven shapes, their rotation variants and spawn rows
//! - [`grid`]: the 12x22 occupancy grid with its wall ring
//! - [`piece`]: the falling piece and its spawn/move/rotate/drop/lock rules
//! - [`line_clear`]: full-row detection and collapse
//! - [`scoring`]: line-clear points and the zero-padded score text
//! - [`session`]: one game's state and its per-step operations
//! - [`mailbox`]: the single-slot command latch
//! - [`clock`]: raw-tick throttling, the gravity countdown and the speed curve
//! - [`sink`]: the notification interface and two test sinks
//! - [`rng`]: shape sources, seeded and scripted
//! - [`config`]: tunables and their loading
//!
//! # Example
//!
//! ```
//! use crate_tetris_core::{GameClock, RecordingSink, SessionConfig, TickOutcome};
//!
//! let mut clock = GameClock::new(SessionConfig::default()).unwrap();
//! let mut sink = RecordingSink::new();
//! clock.start_session(&mut sink);
//!
//! // The first piece enters after six active ticks of six raw ticks each.
//! for _ in 0..36 {
//!     clock.tick(&mut sink);
//! }
//! assert_eq!(clock.session().unwrap().spawned_count(), 1);
//! assert!(clock.session().unwrap().active().is_some());
//! ```

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod grid;
pub mod line_clear;
pub mod mailbox;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod sink;

pub use crate_tetris_types as types;

pub use catalog::{definition, get_variant, ShapeDefinition};
pub use clock::{GameClock, TickOutcome};
pub use config::SessionConfig;
pub use error::ConfigError;
pub use grid::GridState;
pub use line_clear::{check_full_rows, remove_rows};
pub use mailbox::CommandSlot;
pub use piece::{PieceController, PieceState, SpawnOutcome};
pub use rng::{ScriptedShapes, ShapeSource, SimpleRng, UniformShapes};
pub use scoring::{format_score, line_clear_score, ScoreTracker};
pub use session::{CommandOutcome, GravityOutcome, LockReport, Session, SessionPhase};
pub use sink::{NullSink, RecordingSink, SessionSink, SinkEvent, Tee};
