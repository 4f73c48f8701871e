use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_match3::core::{
    find_hint, find_matches, BoardGeometry, BoardSimulation, TimestepScheduler,
    SimulationConfig,
};
use tui_match3::types::{SimulationTime, TileKind, BOARD_SIZE, DEFAULT_FIXED_STEP};

fn striped() -> [[TileKind; BOARD_SIZE]; BOARD_SIZE] {
    let mut kinds = [[TileKind::Red; BOARD_SIZE]; BOARD_SIZE];
    for (r, row) in kinds.iter_mut().enumerate() {
        for (c, kind) in row.iter_mut().enumerate() {
            *kind = TileKind::ALL[(r + 2 * c) % 4];
        }
    }
    kinds
}

fn bench_find_matches(c: &mut Criterion) {
    let mut kinds = striped();
    kinds[7] = [TileKind::Green; BOARD_SIZE];

    c.bench_function("find_matches", |b| {
        b.iter(|| find_matches(black_box(&kinds)))
    });
}

fn bench_find_hint(c: &mut Criterion) {
    let kinds = striped();
    c.bench_function("find_hint", |b| b.iter(|| find_hint(black_box(&kinds))));
}

fn bench_new_board(c: &mut Criterion) {
    let geometry = BoardGeometry::from_board(0.0, 0.0, 400.0);
    let mut seed = 1u32;
    c.bench_function("new_board", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            BoardSimulation::new(geometry, black_box(seed))
        })
    });
}

fn bench_resolve_pass(c: &mut Criterion) {
    let geometry = BoardGeometry::from_board(0.0, 0.0, 400.0);
    let mut kinds = striped();
    kinds[4] = [TileKind::Purple; BOARD_SIZE];

    c.bench_function("resolve_pass_full_row", |b| {
        b.iter(|| {
            let mut board = BoardSimulation::from_kinds(geometry, kinds, 7);
            board.resolve_pass()
        })
    });
}

fn bench_board_update(c: &mut Criterion) {
    let geometry = BoardGeometry::from_board(0.0, 0.0, 400.0);
    let mut board = BoardSimulation::new(geometry, 12345);
    let time = SimulationTime {
        elapsed_time: DEFAULT_FIXED_STEP,
        ..SimulationTime::default()
    };

    c.bench_function("board_update_step", |b| {
        b.iter(|| board.update(black_box(&time)))
    });
}

fn bench_scheduler_tick(c: &mut Criterion) {
    let mut scheduler = TimestepScheduler::new(SimulationConfig::default());
    scheduler.start();

    c.bench_function("scheduler_tick_16ms", |b| {
        b.iter(|| scheduler.tick(black_box(Duration::from_millis(16)), |_| {}))
    });
}

criterion_group!(
    benches,
    bench_find_matches,
    bench_find_hint,
    bench_new_board,
    bench_resolve_pass,
    bench_board_update,
    bench_scheduler_tick
);
criterion_main!(benches);
