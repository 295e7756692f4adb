//! VisualMirror: the host-side picture of a session, rebuilt from sink calls.
//!
//! The renderer never reads the grid directly. It draws whatever this mirror
//! has accumulated, so anything the sink protocol fails to report shows up as
//! a visible difference.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::sink::clear_effect_delay_secs;
use crate::core::SessionSink;
use crate::types::{Cell, TileColor, TileId, WALL_ID};

/// How long a clear flash stays visible once it fires
pub const CLEAR_FLASH_SECS: f32 = 0.25;

/// A pending or running clear flash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearFlash {
    pub cell: Cell,
    /// Seconds until the flash becomes visible
    pub delay: f32,
    /// Seconds of visibility left after the delay
    pub remaining: f32,
}

impl ClearFlash {
    pub fn is_visible(&self) -> bool {
        self.delay <= 0.0 && self.remaining > 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct VisualMirror {
    tiles: BTreeMap<TileId, (Cell, TileColor)>,
    walls: BTreeSet<Cell>,
    flashes: Vec<ClearFlash>,
    score_text: String,
    started: bool,
    game_over: bool,
}

impl VisualMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile visuals currently shown, by id
    pub fn tiles(&self) -> impl Iterator<Item = (TileId, Cell, TileColor)> + '_ {
        self.tiles
            .iter()
            .map(|(&id, &(cell, color))| (id, cell, color))
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.walls.iter().copied()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn flashes(&self) -> &[ClearFlash] {
        &self.flashes
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Age clear flashes by `dt` seconds and drop the finished ones
    pub fn advance(&mut self, dt: f32) {
        for flash in &mut self.flashes {
            if flash.delay > 0.0 {
                let spill = dt - flash.delay;
                flash.delay -= dt;
                if spill > 0.0 {
                    flash.remaining -= spill;
                }
            } else {
                flash.remaining -= dt;
            }
        }
        self.flashes.retain(|f| f.remaining > 0.0);
    }
}

impl SessionSink for VisualMirror {
    fn place_visual(&mut self, cell: Cell, id: TileId, color: TileColor) {
        if id == WALL_ID {
            self.walls.insert(cell);
        } else {
            self.tiles.insert(id, (cell, color));
        }
    }

    fn remove_visual(&mut self, id: TileId) {
        self.tiles.remove(&id);
    }

    fn trigger_clear_effect(&mut self, cell: Cell, stagger: u32) {
        self.flashes.push(ClearFlash {
            cell,
            delay: clear_effect_delay_secs(stagger),
            remaining: CLEAR_FLASH_SECS,
        });
    }

    fn report_score(&mut self, _total: u32, text: &str) {
        self.score_text.clear();
        self.score_text.push_str(text);
    }

    fn on_session_start(&mut self) {
        self.tiles.clear();
        self.walls.clear();
        self.flashes.clear();
        self.score_text.clear();
        self.started = true;
        self.game_over = false;
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
    }
}
