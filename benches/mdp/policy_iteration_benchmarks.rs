use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maze_policy::mdp::{Grid, PolicyIteration, PolicyIterationConfig, SweepMode};

fn bench_reference_maze(c: &mut Criterion) {
    let grid = Grid::reference();

    c.bench_function("policy_iteration_in_place", |b| {
        b.iter(|| {
            let config = PolicyIterationConfig::default();
            let solution = PolicyIteration::new(black_box(&grid), config)
                .and_then(PolicyIteration::run);
            black_box(solution.map(|s| s.iterations))
        });
    });

    c.bench_function("policy_iteration_snapshot", |b| {
        b.iter(|| {
            let config = PolicyIterationConfig::default().with_sweep(SweepMode::Snapshot);
            let solution = PolicyIteration::new(black_box(&grid), config)
                .and_then(PolicyIteration::run);
            black_box(solution.map(|s| s.iterations))
        });
    });
}

fn bench_open_field(c: &mut Criterion) {
    // 40x40 open room with the goal in a corner.
    let mut rows = vec![vec![0u8; 40]; 40];
    rows[0][39] = 2;
    let grid = match Grid::new(rows) {
        Ok(grid) => grid,
        Err(e) => panic!("benchmark grid is invalid: {e}"),
    };

    c.bench_function("policy_iteration_open_40x40", |b| {
        b.iter(|| {
            let solution = PolicyIteration::new(&grid, PolicyIterationConfig::default())
                .and_then(PolicyIteration::run);
            black_box(solution.map(|s| s.iterations))
        });
    });
}

criterion_group!(benches, bench_reference_maze, bench_open_field);
criterion_main!(benches);
