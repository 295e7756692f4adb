//! Grid module - owns the playfield occupancy
//!
//! The grid is 12x22 cells stored in a flat, row-major array. The outer ring is
//! a permanent wall written once at construction; the 10x20 interior holds
//! tiles. Each tile carries a unique id and the grid keeps the id -> color
//! lookup so a tile can be moved without knowing which piece it came from.
//!
//! Every mutating call reports to a [`SessionSink`]. Calls that would break
//! the wall ring or stack two tiles on one cell are contract violations and
//! panic.

use std::collections::HashMap;
use std::fmt;

use crate::sink::SessionSink;
use crate::types::{
    Cell, Occupant, TileColor, TileId, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH, INTERIOR_BOTTOM,
    INTERIOR_LEFT, INTERIOR_RIGHT, INTERIOR_TOP, WALL_ID,
};

/// The playfield - flat array of occupants plus tile colors
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    /// Row-major cells (y * WIDTH + x)
    cells: [Occupant; GRID_CELLS],
    colors: HashMap<TileId, TileColor>,
}

impl GridState {
    /// Create a grid with the wall ring in place and announce the walls to `sink`
    pub fn new(sink: &mut dyn SessionSink) -> Self {
        let mut grid = Self {
            cells: [Occupant::Empty; GRID_CELLS],
            colors: HashMap::new(),
        };

        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                let cell = Cell::new(x, y);
                if cell.is_border() {
                    grid.cells[Self::flat(cell)] = Occupant::Wall;
                    sink.place_visual(cell, WALL_ID, TileColor::Grey);
                }
            }
        }

        grid
    }

    #[inline(always)]
    fn index(cell: Cell) -> Option<usize> {
        if !cell.in_bounds() {
            return None;
        }
        Some(Self::flat(cell))
    }

    #[inline(always)]
    fn flat(cell: Cell) -> usize {
        (cell.y as usize) * (GRID_WIDTH as usize) + (cell.x as usize)
    }

    fn checked_index(cell: Cell) -> usize {
        match Self::index(cell) {
            Some(idx) => idx,
            None => panic!("cell ({}, {}) is outside the grid", cell.x, cell.y),
        }
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.in_bounds()
    }

    /// Occupant at `cell`, `None` when out of bounds
    pub fn get(&self, cell: Cell) -> Option<Occupant> {
        Self::index(cell).map(|idx| self.cells[idx])
    }

    /// Occupant at `cell`. Panics when out of bounds.
    pub fn occupant_at(&self, cell: Cell) -> Occupant {
        self.cells[Self::checked_index(cell)]
    }

    pub fn color_of(&self, id: TileId) -> Option<TileColor> {
        if id == WALL_ID {
            return Some(TileColor::Grey);
        }
        self.colors.get(&id).copied()
    }

    /// Tag `cell` with tile `id`
    ///
    /// Re-occupying a cell that already holds `id` is a no-op and emits nothing.
    pub fn occupy(&mut self, cell: Cell, id: TileId, color: TileColor, sink: &mut dyn SessionSink) {
        assert_ne!(id, WALL_ID, "tile id 0 is reserved for walls");
        let idx = Self::checked_index(cell);

        match self.cells[idx] {
            Occupant::Empty => {}
            Occupant::Tile(current) if current == id => return,
            Occupant::Tile(current) => panic!(
                "cell ({}, {}) already holds tile {} (placing {})",
                cell.x, cell.y, current, id
            ),
            Occupant::Wall => panic!("cell ({}, {}) is a wall", cell.x, cell.y),
        }

        self.cells[idx] = Occupant::Tile(id);
        self.colors.insert(id, color);
        sink.place_visual(cell, id, color);
    }

    /// Empty every cell tagged `id`, returning how many were cleared
    pub fn clear_by_id(&mut self, id: TileId, sink: &mut dyn SessionSink) -> usize {
        assert_ne!(id, WALL_ID, "walls cannot be cleared");

        let mut cleared = 0;
        for cell in &mut self.cells {
            if *cell == Occupant::Tile(id) {
                *cell = Occupant::Empty;
                cleared += 1;
            }
        }

        if cleared > 0 {
            self.colors.remove(&id);
            sink.remove_visual(id);
        }
        cleared
    }

    /// Move the tile at `from` to the empty cell `to`, keeping its id and color
    pub fn relocate(&mut self, from: Cell, to: Cell, sink: &mut dyn SessionSink) {
        let src = Self::checked_index(from);
        let dst = Self::checked_index(to);

        let Occupant::Tile(id) = self.cells[src] else {
            panic!("no tile to relocate at ({}, {})", from.x, from.y);
        };
        assert!(
            self.cells[dst].is_empty(),
            "relocation target ({}, {}) is not empty",
            to.x,
            to.y
        );

        let color = self.color_of(id).unwrap_or(TileColor::Grey);
        self.cells[src] = Occupant::Empty;
        sink.remove_visual(id);
        self.cells[dst] = Occupant::Tile(id);
        sink.place_visual(to, id, color);
    }

    /// Check if every interior column of row `y` is occupied
    pub fn is_row_full(&self, y: i8) -> bool {
        if !(INTERIOR_TOP..=INTERIOR_BOTTOM).contains(&y) {
            return false;
        }
        (INTERIOR_LEFT..=INTERIOR_RIGHT).all(|x| !self.occupant_at(Cell::new(x, y)).is_empty())
    }

    /// All tile cells, row by row from the top
    pub fn tiles(&self) -> impl Iterator<Item = (Cell, TileId)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, occupant)| {
            occupant.tile_id().map(|id| {
                let x = (idx % GRID_WIDTH as usize) as i8;
                let y = (idx / GRID_WIDTH as usize) as i8;
                (Cell::new(x, y), id)
            })
        })
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.tile_id().is_some()).count()
    }

    /// Whether the wall ring is intact
    pub fn walls_intact(&self) -> bool {
        (0..GRID_HEIGHT).all(|y| {
            (0..GRID_WIDTH).all(|x| {
                let cell = Cell::new(x, y);
                cell.is_border() == (self.occupant_at(cell) == Occupant::Wall)
            })
        })
    }

    /// Text dump for debugging
    ///
    /// One line per row, top (`y = 0`) to bottom; columns left (`x = 0`) to
    /// right. Walls print as `[##]`, empty cells as `[ .]`, tiles as their
    /// right-aligned id.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity(GRID_CELLS * 4 + GRID_HEIGHT as usize);
        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                match self.occupant_at(Cell::new(x, y)) {
                    Occupant::Wall => out.push_str("[##]"),
                    Occupant::Empty => out.push_str("[ .]"),
                    Occupant::Tile(id) => out.push_str(&format!("[{:>2}]", id)),
                }
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
