use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::prelude::*;
use shisen_core::*;
use std::hint::black_box;

const TIERS: [(&str, Coord2); 3] = [("small", (6, 4)), ("medium", (10, 8)), ("classic", (14, 10))];

fn solvable_board(size: Coord2) -> Board {
    let config = GameConfig {
        size,
        ..GameConfig::default()
    };
    let faces = config.deck.face_set();
    let mut rng = SmallRng::seed_from_u64(3);
    generate_solvable(&config, &RandomPairGenerator, &faces, &mut rng).unwrap()
}

fn bench_find_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_path");

    for (name, size) in TIERS {
        let board = solvable_board(size);
        let (width, height) = board.interior_size();
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| black_box(board.find_path((1, 1), (width, height))))
        });
    }
    group.finish();
}

fn bench_find_one_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_one_move");

    for (name, size) in TIERS {
        let board = solvable_board(size);
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter_batched(
                || board.clone(),
                |mut board| black_box(find_one_move(&mut board)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_full_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_full_solve");
    group.sample_size(20);

    for (name, size) in TIERS {
        let board = solvable_board(size);
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| black_box(simulate_full_solve(&board)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_path, bench_find_one_move, bench_full_solve);
criterion_main!(benches);
