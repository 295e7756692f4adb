//! Line clear module - full row detection and the bottom-up removal sweep
//!
//! Removal is a single pass from the floor upward. A row marked for removal
//! loses its tiles; every other row moves down by the number of removed rows
//! already seen below it. Because the sweep runs bottom-up, the destination
//! of each move has always been vacated earlier in the same pass.

use arrayvec::ArrayVec;

use crate::grid::GridState;
use crate::sink::SessionSink;
use crate::types::{Cell, INTERIOR_BOTTOM, INTERIOR_LEFT, INTERIOR_RIGHT, INTERIOR_ROWS, INTERIOR_TOP};

/// Row indices found full by a scan (at most every interior row)
pub type FullRows = ArrayVec<i8, INTERIOR_ROWS>;

/// Scan every interior row and return the full ones, top to bottom
pub fn check_full_rows(grid: &GridState) -> FullRows {
    (INTERIOR_TOP..=INTERIOR_BOTTOM)
        .filter(|&y| grid.is_row_full(y))
        .collect()
}

/// Remove `rows` and shift the rows above them down
///
/// Each cleared tile triggers a clear effect whose stagger index grows across
/// the whole call. Returns the number of distinct rows removed.
pub fn remove_rows(grid: &mut GridState, rows: &[i8], sink: &mut dyn SessionSink) -> usize {
    for &y in rows {
        assert!(
            (INTERIOR_TOP..=INTERIOR_BOTTOM).contains(&y),
            "row {} is not an interior row",
            y
        );
    }

    let mut removed_below: i8 = 0;
    let mut stagger: u32 = 0;

    for y in (INTERIOR_TOP..=INTERIOR_BOTTOM).rev() {
        if rows.contains(&y) {
            for x in INTERIOR_LEFT..=INTERIOR_RIGHT {
                let cell = Cell::new(x, y);
                if let Some(id) = grid.occupant_at(cell).tile_id() {
                    grid.clear_by_id(id, sink);
                    sink.trigger_clear_effect(cell, stagger);
                    stagger += 1;
                }
            }
            removed_below += 1;
        } else if removed_below > 0 {
            for x in INTERIOR_LEFT..=INTERIOR_RIGHT {
                let cell = Cell::new(x, y);
                if grid.occupant_at(cell).tile_id().is_some() {
                    grid.relocate(cell, Cell::new(x, y + removed_below), sink);
                }
            }
        }
    }

    removed_below as usize
}
