//! Benchmark for PersistentSequence vs standard Vec.
//!
//! Covers random access, appending, concatenation and selection.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rrb_sequence::persistent::PersistentSequence;
use std::hint::black_box;

// =============================================================================
// get Benchmark (Random Access)
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let persistent_sequence: PersistentSequence<usize> = (0..size).collect();
        let standard_vector: Vec<usize> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentSequence", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for index in 0..size {
                        if let Some(&value) = persistent_sequence.get(black_box(index)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for index in 0..size {
                    if let Some(&value) = standard_vector.get(black_box(index)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// push_back Benchmark
// =============================================================================

fn benchmark_push_back(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("push_back");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("PersistentSequence", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sequence = PersistentSequence::<usize>::new();
                    for index in 0..size {
                        sequence = sequence.push_back(black_box(index));
                    }
                    black_box(sequence)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("collect", size), &size, |bencher, &size| {
            bencher.iter(|| black_box((0..size).collect::<PersistentSequence<usize>>()));
        });
    }

    group.finish();
}

// =============================================================================
// concat Benchmark
// =============================================================================

fn benchmark_concat(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("concat");

    for size in [1000, 10000, 100_000] {
        let left: PersistentSequence<usize> = (0..size).collect();
        let right: PersistentSequence<usize> = (size..size * 2).collect();
        let left_vector: Vec<usize> = (0..size).collect();
        let right_vector: Vec<usize> = (size..size * 2).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentSequence", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(left.concat(black_box(&right))));
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut combined = left_vector.clone();
                combined.extend_from_slice(black_box(&right_vector));
                black_box(combined)
            });
        });
    }

    group.finish();
}

fn benchmark_concat_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("concat_chain");

    for pieces in [10, 100, 1000] {
        let piece: PersistentSequence<usize> = (0..37).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentSequence", pieces),
            &pieces,
            |bencher, &pieces| {
                bencher.iter(|| {
                    let mut combined = PersistentSequence::new();
                    for _ in 0..pieces {
                        combined = combined.concat(black_box(&piece));
                    }
                    black_box(combined)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// select Benchmark
// =============================================================================

fn benchmark_select(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("select");

    for size in [1000, 10000] {
        let persistent_sequence: PersistentSequence<usize> = (0..size).collect();
        let standard_vector: Vec<usize> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentSequence", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    black_box(persistent_sequence.select(|value, _, _| value % 2 == 0))
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(
                    standard_vector
                        .iter()
                        .copied()
                        .filter(|value| value % 2 == 0)
                        .collect::<Vec<_>>(),
                )
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_get,
    benchmark_push_back,
    benchmark_concat,
    benchmark_concat_chain,
    benchmark_select
);

criterion_main!(benches);
