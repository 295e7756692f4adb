//! Piece module - the falling piece and its controller
//!
//! A piece is a value: every move builds a candidate copy, checks it against
//! the grid and only then commits it. The controller owns at most one live
//! piece and hands out tile ids in blocks of four.

use crate::catalog::{definition, Variant};
use crate::grid::GridState;
use crate::rng::ShapeSource;
use crate::sink::SessionSink;
use crate::types::{Cell, Direction, Occupant, ShapeKind, TileId};

/// Position and orientation of one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceState {
    /// Base tile id; the piece owns `id..id + 4`
    pub id: TileId,
    pub x: i8,
    pub y: i8,
    pub shape: ShapeKind,
    /// Index into the shape's variants, always below the variant count
    pub rotation: usize,
}

impl PieceState {
    /// Piece at the shape's spawn anchor with rotation 0
    pub fn spawn(shape: ShapeKind, id: TileId) -> Self {
        let (x, y) = definition(shape).spawn_anchor();
        Self {
            id,
            x,
            y,
            shape,
            rotation: 0,
        }
    }

    pub fn variant(&self) -> &'static Variant {
        definition(self.shape).variant(self.rotation)
    }

    /// Absolute cells of the four blocks; block `i` carries id `id + i`
    pub fn cells(&self) -> [Cell; 4] {
        let anchor = Cell::new(self.x, self.y);
        let variant = *self.variant();
        variant.map(|(dx, dy)| anchor.offset(dx, dy))
    }

    pub fn ids(&self) -> [TileId; 4] {
        [self.id, self.id + 1, self.id + 2, self.id + 3]
    }

    /// Whether `id` is one of this piece's four tile ids
    pub fn owns(&self, id: TileId) -> bool {
        id >= self.id && id < self.id + 4
    }

    pub fn shifted(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % definition(self.shape).variant_count(),
            ..*self
        }
    }

    /// Check that every block is in bounds and sits on an empty cell or on a
    /// cell already tagged with one of this piece's own ids
    pub fn is_legal(&self, grid: &GridState) -> bool {
        self.cells().iter().all(|&cell| match grid.get(cell) {
            None => false,
            Some(Occupant::Empty) => true,
            Some(Occupant::Tile(id)) => self.owns(id),
            Some(Occupant::Wall) => false,
        })
    }
}

/// Result of a spawn attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// The piece is live and occupies the grid
    Spawned(PieceState),
    /// No room for the piece; the session is over
    Blocked(PieceState),
}

/// Owner of the falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceController {
    active: Option<PieceState>,
    next_id: TileId,
}

impl PieceController {
    pub fn new() -> Self {
        Self {
            active: None,
            next_id: 1,
        }
    }

    pub fn active(&self) -> Option<PieceState> {
        self.active
    }

    pub fn next_id(&self) -> TileId {
        self.next_id
    }

    /// Number of spawn attempts so far; the speed curve input
    pub fn spawned_count(&self) -> u32 {
        self.next_id / 4
    }

    /// Spawn a new piece of a shape drawn from `source`
    ///
    /// The id block is consumed even when the spawn is blocked. A blocked piece
    /// is shown to the sink but never written into the grid.
    pub fn spawn(
        &mut self,
        grid: &mut GridState,
        source: &mut dyn ShapeSource,
        sink: &mut dyn SessionSink,
    ) -> SpawnOutcome {
        debug_assert!(self.active.is_none(), "spawn while a piece is live");

        let shape = source.next_shape();
        let piece = PieceState::spawn(shape, self.next_id);
        self.next_id += 4;

        if !piece.is_legal(grid) {
            for (cell, id) in piece.cells().into_iter().zip(piece.ids()) {
                sink.place_visual(cell, id, shape.color());
            }
            return SpawnOutcome::Blocked(piece);
        }

        Self::paint(grid, &piece, sink);
        self.active = Some(piece);
        SpawnOutcome::Spawned(piece)
    }

    /// Shift the live piece one cell; returns false when rejected or idle
    pub fn shift(
        &mut self,
        direction: Direction,
        grid: &mut GridState,
        sink: &mut dyn SessionSink,
    ) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.commit(active.shifted(direction), grid, sink)
    }

    /// Advance the live piece to its next rotation variant
    ///
    /// Shapes with a single variant always reject.
    pub fn rotate(&mut self, grid: &mut GridState, sink: &mut dyn SessionSink) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !definition(active.shape).rotates() {
            return false;
        }
        self.commit(active.rotated(), grid, sink)
    }

    /// Move the live piece straight down to its lowest legal row
    ///
    /// Returns the resting piece, still live; the caller locks it.
    pub fn hard_drop(
        &mut self,
        grid: &mut GridState,
        sink: &mut dyn SessionSink,
    ) -> Option<PieceState> {
        let active = self.active?;

        let mut resting = active;
        loop {
            let next = resting.shifted(Direction::Down);
            if !next.is_legal(grid) {
                break;
            }
            resting = next;
        }

        if resting != active {
            self.commit(resting, grid, sink);
        }
        self.active
    }

    /// Commit the live piece's cells as terrain and release it
    pub fn lock(&mut self, grid: &mut GridState, sink: &mut dyn SessionSink) -> Option<PieceState> {
        let piece = self.active.take()?;
        Self::paint(grid, &piece, sink);
        Some(piece)
    }

    /// Place a piece directly, bypassing the shape source
    ///
    /// Used for scripted setups; returns false (and keeps the current state)
    /// when another piece is live, the id block was already handed out or is
    /// in the grid, or any target cell is not empty.
    pub fn place(
        &mut self,
        piece: PieceState,
        grid: &mut GridState,
        sink: &mut dyn SessionSink,
    ) -> bool {
        if self.active.is_some() || piece.id < self.next_id {
            return false;
        }
        // A fresh piece owns nothing yet, so the self-exclusion in
        // `is_legal` does not apply here.
        let cells_empty = piece
            .cells()
            .iter()
            .all(|&cell| grid.get(cell) == Some(Occupant::Empty));
        if !cells_empty || grid.tiles().any(|(_, id)| piece.owns(id)) {
            return false;
        }
        Self::paint(grid, &piece, sink);
        self.next_id = self.next_id.max(piece.id + 4);
        self.active = Some(piece);
        true
    }

    fn commit(
        &mut self,
        candidate: PieceState,
        grid: &mut GridState,
        sink: &mut dyn SessionSink,
    ) -> bool {
        if !candidate.is_legal(grid) {
            return false;
        }
        if let Some(current) = self.active {
            for id in current.ids() {
                grid.clear_by_id(id, sink);
            }
        }
        Self::paint(grid, &candidate, sink);
        self.active = Some(candidate);
        true
    }

    fn paint(grid: &mut GridState, piece: &PieceState, sink: &mut dyn SessionSink) {
        let color = piece.shape.color();
        for (cell, id) in piece.cells().into_iter().zip(piece.ids()) {
            grid.occupy(cell, id, color, sink);
        }
    }
}

impl Default for PieceController {
    fn default() -> Self {
        Self::new()
    }
}
