//! Sink module - notifications for the presentation layer
//!
//! The rules engine never draws, plays sounds or prints. Every grid mutation
//! and lifecycle change is reported through [`SessionSink`], and a host can
//! rebuild everything it shows from these calls alone.

use crate::types::{Cell, TileColor, TileId, CLEAR_EFFECT_BASE_DELAY_SECS, CLEAR_EFFECT_STEP_SECS};

/// Receiver of state-change notifications
///
/// All methods default to no-ops so hosts only implement what they render.
pub trait SessionSink {
    /// A cell became occupied by `id` (walls use id 0)
    fn place_visual(&mut self, _cell: Cell, _id: TileId, _color: TileColor) {}

    /// Every cell tagged `id` was cleared
    fn remove_visual(&mut self, _id: TileId) {}

    /// A tile was destroyed by a line clear; `stagger` counts the cells
    /// already cleared earlier in the same sweep
    fn trigger_clear_effect(&mut self, _cell: Cell, _stagger: u32) {}

    /// The score changed; `text` is the zero-padded display form
    fn report_score(&mut self, _total: u32, _text: &str) {}

    fn on_session_start(&mut self) {}

    fn on_game_over(&mut self) {}
}

/// Sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SessionSink for NullSink {}

/// Delay in seconds before the clear effect with the given stagger index fires
pub fn clear_effect_delay_secs(stagger: u32) -> f32 {
    CLEAR_EFFECT_BASE_DELAY_SECS + stagger as f32 * CLEAR_EFFECT_STEP_SECS
}

/// A single recorded notification
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Place {
        cell: Cell,
        id: TileId,
        color: TileColor,
    },
    Remove {
        id: TileId,
    },
    ClearEffect {
        cell: Cell,
        stagger: u32,
    },
    Score {
        total: u32,
        text: String,
    },
    SessionStart,
    GameOver,
}

/// Sink that records every notification in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded events, leaving the sink empty
    pub fn drain(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear_effects(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.events.iter().filter_map(|e| match e {
            SinkEvent::ClearEffect { cell, stagger } => Some((*cell, *stagger)),
            _ => None,
        })
    }

    /// Most recent score report, if any
    pub fn last_score(&self) -> Option<(u32, &str)> {
        self.events.iter().rev().find_map(|e| match e {
            SinkEvent::Score { total, text } => Some((*total, text.as_str())),
            _ => None,
        })
    }
}

impl SessionSink for RecordingSink {
    fn place_visual(&mut self, cell: Cell, id: TileId, color: TileColor) {
        self.events.push(SinkEvent::Place { cell, id, color });
    }

    fn remove_visual(&mut self, id: TileId) {
        self.events.push(SinkEvent::Remove { id });
    }

    fn trigger_clear_effect(&mut self, cell: Cell, stagger: u32) {
        self.events.push(SinkEvent::ClearEffect { cell, stagger });
    }

    fn report_score(&mut self, total: u32, text: &str) {
        self.events.push(SinkEvent::Score {
            total,
            text: text.to_string(),
        });
    }

    fn on_session_start(&mut self) {
        self.events.push(SinkEvent::SessionStart);
    }

    fn on_game_over(&mut self) {
        self.events.push(SinkEvent::GameOver);
    }
}

/// Fan notifications out to two sinks
pub struct Tee<'a, A: SessionSink + ?Sized, B: SessionSink + ?Sized> {
    pub first: &'a mut A,
    pub second: &'a mut B,
}

impl<'a, A: SessionSink + ?Sized, B: SessionSink + ?Sized> Tee<'a, A, B> {
    pub fn new(first: &'a mut A, second: &'a mut B) -> Self {
        Self { first, second }
    }
}

impl<A: SessionSink + ?Sized, B: SessionSink + ?Sized> SessionSink for Tee<'_, A, B> {
    fn place_visual(&mut self, cell: Cell, id: TileId, color: TileColor) {
        self.first.place_visual(cell, id, color);
        self.second.place_visual(cell, id, color);
    }

    fn remove_visual(&mut self, id: TileId) {
        self.first.remove_visual(id);
        self.second.remove_visual(id);
    }

    fn trigger_clear_effect(&mut self, cell: Cell, stagger: u32) {
        self.first.trigger_clear_effect(cell, stagger);
        self.second.trigger_clear_effect(cell, stagger);
    }

    fn report_score(&mut self, total: u32, text: &str) {
        self.first.report_score(total, text);
        self.second.report_score(total, text);
    }

    fn on_session_start(&mut self) {
        self.first.on_session_start();
        self.second.on_session_start();
    }

    fn on_game_over(&mut self) {
        self.first.on_game_over();
        self.second.on_game_over();
    }
}
