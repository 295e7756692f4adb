//! Terminal presentation for the rules engine.
//!
//! Everything here sits on the far side of the [`SessionSink`](crate::core::SessionSink)
//! boundary: [`VisualMirror`] rebuilds the picture from notifications,
//! [`GameView`] draws it into a [`FrameBuffer`], [`TerminalRenderer`] flushes
//! frames to the terminal and [`EventLog`] turns the same notifications into
//! bracket-prefixed log lines.

pub mod fb;
pub mod game_view;
pub mod log;
pub mod mirror;
pub mod renderer;

pub use crate_tetris_core as core;
pub use crate_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Ink};
pub use game_view::{AnchorY, GameView, HudInfo, Viewport};
pub use log::EventLog;
pub use mirror::{ClearFlash, VisualMirror};
pub use renderer::{encode_frame, palette, TerminalRenderer};
