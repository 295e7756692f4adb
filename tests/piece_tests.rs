//! Piece tests - catalog data, legality, movement and id allocation

use std::collections::HashSet;

use crate_tetris::core::{
    definition, GridState, NullSink, PieceController, PieceState, RecordingSink, ScriptedShapes,
    SinkEvent, SpawnOutcome,
};
use crate_tetris::types::{Cell, Direction, Occupant, ShapeKind, TileColor, SPAWN_COLUMN};

fn spawned(shape: ShapeKind) -> (GridState, PieceController) {
    let mut grid = GridState::new(&mut NullSink);
    let mut pieces = PieceController::new();
    let mut source = ScriptedShapes::repeat(shape);
    assert!(matches!(
        pieces.spawn(&mut grid, &mut source, &mut NullSink),
        SpawnOutcome::Spawned(_)
    ));
    (grid, pieces)
}

fn cell_set(piece: &PieceState) -> HashSet<Cell> {
    piece.cells().into_iter().collect()
}

#[test]
fn test_spawn_anchor_and_ids() {
    for shape in ShapeKind::ALL {
        let (grid, pieces) = spawned(shape);
        let active = pieces.active().unwrap();
        assert_eq!(active.x, SPAWN_COLUMN);
        assert_eq!(active.y, definition(shape).spawn_row);
        assert_eq!(active.rotation, 0);
        assert_eq!(active.id, 1);
        assert_eq!(pieces.next_id(), 5);

        for (cell, id) in active.cells().into_iter().zip(active.ids()) {
            assert_eq!(grid.occupant_at(cell), Occupant::Tile(id));
            assert_eq!(grid.color_of(id), Some(shape.color()));
        }
    }
}

#[test]
fn test_ids_advance_by_four() {
    let mut grid = GridState::new(&mut NullSink);
    let mut pieces = PieceController::new();
    let mut source = ScriptedShapes::repeat(ShapeKind::I);

    let mut ids = Vec::new();
    for _ in 0..5 {
        pieces.spawn(&mut grid, &mut source, &mut NullSink);
        pieces.hard_drop(&mut grid, &mut NullSink);
        ids.push(pieces.lock(&mut grid, &mut NullSink).unwrap().id);
    }
    assert_eq!(ids, vec![1, 5, 9, 13, 17]);
    assert_eq!(pieces.spawned_count(), 5);
}

#[test]
fn test_shift_left_right_down() {
    let (mut grid, mut pieces) = spawned(ShapeKind::T);
    let start = pieces.active().unwrap();

    assert!(pieces.shift(Direction::Left, &mut grid, &mut NullSink));
    assert_eq!(pieces.active().unwrap().x, start.x - 1);
    assert!(pieces.shift(Direction::Right, &mut grid, &mut NullSink));
    assert!(pieces.shift(Direction::Right, &mut grid, &mut NullSink));
    assert_eq!(pieces.active().unwrap().x, start.x + 1);
    assert!(pieces.shift(Direction::Down, &mut grid, &mut NullSink));
    assert_eq!(pieces.active().unwrap().y, start.y + 1);

    // Old cells are cleared, new cells carry the same ids.
    assert_eq!(grid.tile_count(), 4);
    let active = pieces.active().unwrap();
    for (cell, id) in active.cells().into_iter().zip(active.ids()) {
        assert_eq!(grid.occupant_at(cell), Occupant::Tile(id));
    }
}

#[test]
fn test_move_emits_removes_then_places() {
    let (mut grid, mut pieces) = spawned(ShapeKind::O);
    let mut sink = RecordingSink::new();
    assert!(pieces.shift(Direction::Left, &mut grid, &mut sink));

    assert_eq!(sink.events.len(), 8);
    assert!(sink.events[..4]
        .iter()
        .all(|e| matches!(e, SinkEvent::Remove { .. })));
    let color = ShapeKind::O.color();
    assert!(sink.events[4..]
        .iter()
        .all(|e| matches!(e, SinkEvent::Place { color: c, .. } if *c == color)));
}

#[test]
fn test_wall_blocks_shift_without_change() {
    let (mut grid, mut pieces) = spawned(ShapeKind::O);

    let mut moves = 0;
    while pieces.shift(Direction::Left, &mut grid, &mut NullSink) {
        moves += 1;
    }
    // O spans columns 5-6; the leftmost legal anchor is column 1.
    assert_eq!(moves, 4);
    let before = pieces.active().unwrap();

    let mut sink = RecordingSink::new();
    assert!(!pieces.shift(Direction::Left, &mut grid, &mut sink));
    assert_eq!(pieces.active().unwrap(), before);
    assert!(sink.events.is_empty());
}

#[test]
fn test_rotation_cycles_back() {
    for shape in ShapeKind::ALL {
        let (mut grid, mut pieces) = spawned(shape);
        // Get clear of the ceiling so every variant fits.
        for _ in 0..3 {
            pieces.shift(Direction::Down, &mut grid, &mut NullSink);
        }
        let start = pieces.active().unwrap();
        let count = definition(shape).variant_count();

        if count == 1 {
            assert!(!pieces.rotate(&mut grid, &mut NullSink));
            assert_eq!(pieces.active().unwrap(), start);
            continue;
        }
        for _ in 0..count {
            assert!(pieces.rotate(&mut grid, &mut NullSink), "{:?}", shape);
        }
        let end = pieces.active().unwrap();
        assert_eq!(end.rotation, start.rotation);
        assert_eq!(cell_set(&end), cell_set(&start));
    }
}

#[test]
fn test_rotation_blocked_without_kick() {
    let mut grid = GridState::new(&mut NullSink);
    let mut pieces = PieceController::new();
    // Vertical I hugging the right wall cannot turn horizontal.
    let piece = PieceState {
        id: 1,
        x: 10,
        y: 5,
        shape: ShapeKind::I,
        rotation: 0,
    };
    assert!(pieces.place(piece, &mut grid, &mut NullSink));
    assert!(!pieces.rotate(&mut grid, &mut NullSink));
    assert_eq!(pieces.active().unwrap(), piece);
}

#[test]
fn test_legality_allows_own_cells_only() {
    let mut grid = GridState::new(&mut NullSink);
    let piece = PieceState::spawn(ShapeKind::T, 1);
    assert!(piece.is_legal(&grid));

    for (cell, id) in piece.cells().into_iter().zip(piece.ids()) {
        grid.occupy(cell, id, TileColor::Purple, &mut NullSink);
    }
    assert!(piece.is_legal(&grid));

    let other = PieceState { id: 5, ..piece };
    assert!(!other.is_legal(&grid));

    let in_wall = PieceState { x: 0, ..piece };
    assert!(!in_wall.is_legal(&grid));

    let off_grid = PieceState { y: 30, ..piece };
    assert!(!off_grid.is_legal(&grid));
}

#[test]
fn test_hard_drop_reaches_floor_and_stays_live() {
    let (mut grid, mut pieces) = spawned(ShapeKind::O);
    let resting = pieces.hard_drop(&mut grid, &mut NullSink).unwrap();

    assert_eq!(resting.y, 19);
    assert_eq!(pieces.active(), Some(resting));
    let lowest = resting.cells().iter().map(|c| c.y).max();
    assert_eq!(lowest, Some(20));
}

#[test]
fn test_hard_drop_on_resting_piece_is_silent() {
    let (mut grid, mut pieces) = spawned(ShapeKind::O);
    pieces.hard_drop(&mut grid, &mut NullSink);

    let mut sink = RecordingSink::new();
    let before = pieces.active();
    assert_eq!(pieces.hard_drop(&mut grid, &mut sink), before);
    assert!(sink.events.is_empty());
}

#[test]
fn test_lock_releases_piece_and_keeps_terrain() {
    let (mut grid, mut pieces) = spawned(ShapeKind::L);
    pieces.hard_drop(&mut grid, &mut NullSink);

    let mut sink = RecordingSink::new();
    let locked = pieces.lock(&mut grid, &mut sink).unwrap();
    // Repainting cells the piece already holds emits nothing.
    assert!(sink.events.is_empty());
    assert!(pieces.active().is_none());
    for (cell, id) in locked.cells().into_iter().zip(locked.ids()) {
        assert_eq!(grid.occupant_at(cell), Occupant::Tile(id));
    }
    assert!(pieces.lock(&mut grid, &mut NullSink).is_none());
}

#[test]
fn test_blocked_spawn_reports_visuals_but_leaves_grid() {
    let mut grid = GridState::new(&mut NullSink);
    grid.occupy(Cell::new(SPAWN_COLUMN, 1), 900, TileColor::Red, &mut NullSink);
    let before = grid.clone();

    let mut pieces = PieceController::new();
    let mut source = ScriptedShapes::repeat(ShapeKind::O);
    let mut sink = RecordingSink::new();

    let SpawnOutcome::Blocked(piece) = pieces.spawn(&mut grid, &mut source, &mut sink) else {
        panic!("spawn onto an occupied cell must be blocked");
    };
    assert_eq!(piece.id, 1);
    assert_eq!(pieces.next_id(), 5);
    assert!(pieces.active().is_none());
    assert_eq!(grid, before);
    assert_eq!(sink.events.len(), 4);
    assert!(sink
        .events
        .iter()
        .all(|e| matches!(e, SinkEvent::Place { .. })));
}
