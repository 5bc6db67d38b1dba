//! Throughput of the rotation function and of small end-to-end searches.
//!
//! Run with: `cargo bench`
//! Save baseline: `cargo bench -- --save-baseline main`
//! Compare: `cargo bench -- --baseline main`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dirt_search::output::CollectSink;
use dirt_search::query::{Axis, Facing, Predicate};
use dirt_search::search::{Coordinate, SearchEngine, SearchVolume};
use dirt_search::world::{orientation, position_seed};

fn bench_orientation(c: &mut Criterion) {
    let mut group = c.benchmark_group("world");
    group.throughput(Throughput::Elements(1));

    group.bench_function("position_seed", |b| {
        b.iter(|| position_seed(black_box(-1234), black_box(64), black_box(98765)))
    });
    group.bench_function("orientation", |b| {
        b.iter(|| orientation(black_box(-1234), black_box(64), black_box(98765)))
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let volume = SearchVolume::new(Coordinate::new(-64, 60, -64), Coordinate::new(63, 67, 63))
        .expect("valid volume");
    let predicate =
        Predicate::from_rotations(&[0, 3, 1, 2], Axis::Y, Facing::North).expect("valid predicate");

    let mut group = c.benchmark_group("search");
    group.sample_size(20);
    group.throughput(Throughput::Elements(volume.cell_count() as u64));

    for workers in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            let engine = SearchEngine::new(volume, predicate.clone(), workers);
            b.iter(|| {
                let sink = CollectSink::new();
                engine.run(&sink).expect("search");
                sink.into_sorted()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_orientation, bench_search);
criterion_main!(benches);
