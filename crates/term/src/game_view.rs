//! GameView: maps a [`VisualMirror`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::fb::{FrameBuffer, Glyph, Ink};
use crate::mirror::VisualMirror;
use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Clock readings shown in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudInfo {
    pub pieces: u32,
    pub speed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the session grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the mirrored session into an existing framebuffer.
    ///
    /// Every glyph is rewritten, so the buffer the renderer hands back can be
    /// drawn into directly.
    pub fn render_into(
        &self,
        mirror: &VisualMirror,
        hud: HudInfo,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.reset(viewport.width, viewport.height);

        let grid_px_w = (GRID_WIDTH as u16) * self.cell_w;
        let grid_px_h = (GRID_HEIGHT as u16) * self.cell_h;

        let start_x = viewport.width.saturating_sub(grid_px_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(grid_px_h) / 2,
            AnchorY::Top => 0,
        };

        if mirror.started() {
            let empty = Glyph::new('·', Ink::Empty);
            for y in 0..GRID_HEIGHT {
                for x in 0..GRID_WIDTH {
                    self.fill_cell(fb, start_x, start_y, Cell::new(x, y), empty);
                }
            }
            for cell in mirror.walls() {
                self.fill_cell(fb, start_x, start_y, cell, Glyph::new('▓', Ink::Wall));
            }
            for (_, cell, color) in mirror.tiles() {
                self.fill_cell(fb, start_x, start_y, cell, Glyph::new('█', Ink::Tile(color)));
            }
            for f in mirror.flashes().iter().filter(|f| f.is_visible()) {
                self.fill_cell(fb, start_x, start_y, f.cell, Glyph::new('✦', Ink::Flash));
            }
        }

        self.draw_side_panel(fb, mirror, hud, viewport, start_x, start_y, grid_px_w);

        if !mirror.started() {
            self.draw_overlay_text(fb, start_x, start_y, grid_px_w, grid_px_h, "PRESS ENTER");
        } else if mirror.game_over() {
            self.draw_overlay_text(fb, start_x, start_y, grid_px_w, grid_px_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, mirror: &VisualMirror, hud: HudInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(mirror, hud, viewport, &mut fb);
        fb
    }

    /// Top-left terminal position of a grid cell.
    pub fn cell_origin(&self, viewport: Viewport, cell: Cell) -> (u16, u16) {
        let grid_px_w = (GRID_WIDTH as u16) * self.cell_w;
        let grid_px_h = (GRID_HEIGHT as u16) * self.cell_h;
        let start_x = viewport.width.saturating_sub(grid_px_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(grid_px_h) / 2,
            AnchorY::Top => 0,
        };
        (
            start_x + cell.x as u16 * self.cell_w,
            start_y + cell.y as u16 * self.cell_h,
        )
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell: Cell,
        glyph: Glyph,
    ) {
        if !cell.in_bounds() {
            return;
        }
        let px = start_x + cell.x as u16 * self.cell_w;
        let py = start_y + cell.y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, glyph);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        mirror: &VisualMirror,
        hud: HudInfo,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        grid_w: u16,
    ) {
        let panel_x = start_x.saturating_add(grid_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", Ink::Label);
        y = y.saturating_add(1);
        let score = if mirror.score_text().is_empty() {
            "-"
        } else {
            mirror.score_text()
        };
        fb.put_str(panel_x, y, score, Ink::Value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", Ink::Label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &hud.pieces.to_string(), Ink::Value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", Ink::Label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &hud.speed.to_string(), Ink::Value);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        grid_w: u16,
        grid_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(grid_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(grid_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, Ink::Banner);
    }
}
