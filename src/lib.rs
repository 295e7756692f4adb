//! Falling-block rules engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `crate_tetris::{core,input,term,types}` and hosts the
//! terminal and headless runners.

pub use crate_tetris_core as core;
pub use crate_tetris_input as input;
pub use crate_tetris_term as term;
pub use crate_tetris_types as types;
