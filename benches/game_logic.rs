use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crate_tetris::core::{
    check_full_rows, remove_rows, GameClock, GridState, NullSink, PieceController, ScriptedShapes,
    SessionConfig, TickOutcome,
};
use crate_tetris::types::{Cell, Direction, ShapeKind, TileColor, INTERIOR_LEFT, INTERIOR_RIGHT};

fn bench_tick(c: &mut Criterion) {
    let mut clock = GameClock::new(SessionConfig::default()).unwrap();
    clock.start_session(&mut NullSink);

    c.bench_function("raw_tick", |b| {
        b.iter(|| {
            if clock.tick(&mut NullSink) == TickOutcome::Idle {
                clock.start_session(&mut NullSink);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = GridState::new(&mut NullSink);
            let mut id = 1;
            for y in 17..=20 {
                for x in INTERIOR_LEFT..=INTERIOR_RIGHT {
                    grid.occupy(Cell::new(x, y), id, TileColor::Red, &mut NullSink);
                    id += 1;
                }
            }
            let rows = check_full_rows(&grid);
            black_box(remove_rows(&mut grid, &rows, &mut NullSink));
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut source = ScriptedShapes::new(ShapeKind::ALL.to_vec());

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            let mut grid = GridState::new(&mut NullSink);
            let mut pieces = PieceController::new();
            black_box(pieces.spawn(&mut grid, &mut source, &mut NullSink));
        })
    });
}

fn bench_shift(c: &mut Criterion) {
    let mut source = ScriptedShapes::repeat(ShapeKind::T);
    let mut grid = GridState::new(&mut NullSink);
    let mut pieces = PieceController::new();
    pieces.spawn(&mut grid, &mut source, &mut NullSink);
    let mut left = true;

    c.bench_function("shift", |b| {
        b.iter(|| {
            let direction = if left { Direction::Left } else { Direction::Right };
            if !pieces.shift(direction, &mut grid, &mut NullSink) {
                left = !left;
            }
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    c.bench_function("hard_drop_and_lock", |b| {
        b.iter(|| {
            let mut source = ScriptedShapes::repeat(ShapeKind::I);
            let mut grid = GridState::new(&mut NullSink);
            let mut pieces = PieceController::new();
            pieces.spawn(&mut grid, &mut source, &mut NullSink);
            pieces.hard_drop(&mut grid, &mut NullSink);
            black_box(pieces.lock(&mut grid, &mut NullSink));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_spawn,
    bench_shift,
    bench_hard_drop
);
criterion_main!(benches);
