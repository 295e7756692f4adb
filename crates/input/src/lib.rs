//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into session [`Command`](crate::types::Command)s
//! and the host-level fire action. Holds no state: every key press is a single
//! command, since the session has no repeat or soft-drop behavior.

pub mod map;

pub use crate_tetris_types as types;

pub use map::{handle_key_event, should_quit, KeyAction};
