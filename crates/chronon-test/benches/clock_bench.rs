//! Benchmarks for Chronon clocks and comparison

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chronon_core::{Instant, ReplicaId, VersionVector, WallTime};
use chronon_time::{ClockAdapter, ClockSource, Comparator, LinearProjection, LogicalClock, SteppedClock, WallClock};

fn bench_wall_clock_now(c: &mut Criterion) {
    let clock = WallClock::new();

    c.bench_function("wall_clock_now", |b| b.iter(|| black_box(clock.now())));
}

fn bench_logical_clock_now(c: &mut Criterion) {
    let clock = LogicalClock::new(ReplicaId(1));

    c.bench_function("logical_clock_now", |b| b.iter(|| black_box(clock.now())));
}

fn bench_stepped_clock_advance(c: &mut Criterion) {
    let clock = SteppedClock::new(WallTime::EPOCH);
    let dt = Duration::from_millis(10);

    c.bench_function("stepped_clock_advance", |b| {
        b.iter(|| black_box(clock.advance(black_box(dt))))
    });
}

fn bench_vector_compare(c: &mut Criterion) {
    let mut left = VersionVector::new();
    let mut right = VersionVector::new();
    for replica in 0..16 {
        left.set(ReplicaId(replica), replica + 1);
        right.set(ReplicaId(replica), 16 - replica);
    }

    c.bench_function("vector_compare_16", |b| {
        b.iter(|| black_box(black_box(&left).compare(black_box(&right))))
    });
}

fn bench_projected_compare(c: &mut Criterion) {
    let wall = SteppedClock::new(WallTime::from_millis(500));
    let logical = LogicalClock::new(ReplicaId(1));
    let projection = LinearProjection::default();
    let t_wall = wall.now();
    let t_logical = logical.now();

    let Ok(cmp) = Comparator::new(&wall, &logical, Some(&projection as &dyn ClockAdapter)) else {
        return;
    };

    c.bench_function("projected_compare", |b| {
        b.iter(|| black_box(cmp.compare(black_box(&t_wall), black_box(&t_logical))))
    });
    c.bench_function("linear_projection", |b| {
        b.iter(|| black_box(projection.project(black_box(&Instant::Metric(WallTime::EPOCH)))))
    });
}

criterion_group!(
    benches,
    bench_wall_clock_now,
    bench_logical_clock_now,
    bench_stepped_clock_advance,
    bench_vector_compare,
    bench_projected_compare,
);
criterion_main!(benches);
