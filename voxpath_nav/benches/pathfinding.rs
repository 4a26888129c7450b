// Benchmarks for search and smoothing on rolling terrain.
//
// The terrain is a deterministic sin/cos height field, gentle enough that
// most of it is walkable with single-voxel steps but bumpy enough that
// raw paths are full of jumps and drops.
//
// Run with: cargo bench -p voxpath_nav

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use voxpath_nav::smoothing::sweep_table;
use voxpath_nav::{
    Navigator, PathConfig, PathRequest, SearchMode, SparseVoxelWorld, VoxelCoord, find_path,
    smooth_path,
};

const HEIGHT: i32 = 2;

fn column_top(x: i32, z: i32) -> i32 {
    let (fx, fz) = (f64::from(x), f64::from(z));
    ((fx * 0.21).sin() * 2.0 + (fz * 0.17).cos() * 2.0 + 4.0).round() as i32
}

fn terrain(radius: i32) -> SparseVoxelWorld {
    let mut world = SparseVoxelWorld::new();
    for z in -radius..=radius {
        for x in -radius..=radius {
            world.fill_box(
                VoxelCoord::new(x, 0, z),
                VoxelCoord::new(x, column_top(x, z), z),
                true,
            );
        }
    }
    world
}

fn standing(x: i32, z: i32) -> VoxelCoord {
    VoxelCoord::new(x, column_top(x, z) + 1, z)
}

fn bench_search_modes(c: &mut Criterion) {
    let world = terrain(40);
    let mut group = c.benchmark_group("search");
    for distance in [10, 25, 40] {
        let start = standing(-distance, -distance / 2);
        let goal = standing(distance, distance / 2);
        for mode in [SearchMode::Greedy, SearchMode::Shortest] {
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), distance),
                &(start, goal),
                |b, &(start, goal)| {
                    b.iter(|| {
                        let result = find_path(&world, HEIGHT, start, goal, mode, None);
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let world = terrain(40);
    let raw = find_path(
        &world,
        HEIGHT,
        standing(-30, -10),
        standing(30, 10),
        SearchMode::Shortest,
        None,
    );

    c.bench_function("smooth_path", |b| {
        b.iter(|| {
            let smoothed = smooth_path(&world, HEIGHT, black_box(&raw.path));
            black_box(smoothed)
        })
    });

    // First call builds the tables; later calls are lookups.
    black_box(sweep_table(0, 0));
    c.bench_function("sweep_table_lookup", |b| {
        b.iter(|| black_box(sweep_table(black_box(13), black_box(7))).len())
    });
}

fn bench_batch(c: &mut Criterion) {
    let world = terrain(40);
    let navigator = Navigator::new(PathConfig::default()).unwrap();
    let requests: Vec<_> = (-8..8)
        .map(|i| PathRequest::new(standing(-30, i * 3), standing(30, -i * 3)))
        .collect();

    let mut group = c.benchmark_group("batch");
    group.sample_size(20);
    group.bench_function("sequential", |b| {
        b.iter(|| {
            let responses: Vec<_> = requests
                .iter()
                .map(|r| navigator.compute_path(&world, r))
                .collect();
            black_box(responses)
        })
    });
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(navigator.compute_paths(&world, &requests)))
    });
    group.finish();
}

criterion_group!(benches, bench_search_modes, bench_smoothing, bench_batch);
criterion_main!(benches);
