//! Benchmarks for Chronon relation evaluation

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chronon_core::WallTime;
use chronon_relation::{Operands, PointRelation, Relation, RelationEngine};
use chronon_test::{block_on, extent_ms, ms, Timeline};
use chronon_time::{Comparator, SteppedClock};

fn bench_evaluate_before(c: &mut Criterion) {
    let clock = SteppedClock::new(WallTime::EPOCH);
    let a = extent_ms(0, 10);
    let b = extent_ms(20, 30);

    c.bench_function("evaluate_before", |bench| {
        bench.iter(|| {
            let ops = Operands::new(&a, &b, Comparator::single(&clock));
            black_box(RelationEngine::evaluate(black_box(Relation::Before), &ops))
        })
    });
}

fn bench_evaluate_catalogue(c: &mut Criterion) {
    let clock = SteppedClock::new(WallTime::EPOCH);
    let a = extent_ms(0, 25);
    let b = extent_ms(10, 30);

    c.bench_function("evaluate_catalogue", |bench| {
        bench.iter(|| {
            let ops = Operands::new(&a, &b, Comparator::single(&clock));
            for relation in Relation::ALL {
                let _ = black_box(RelationEngine::evaluate(relation, &ops));
            }
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let clock = SteppedClock::new(WallTime::EPOCH);
    let a = extent_ms(10, 20);
    let b = extent_ms(0, 30);

    c.bench_function("classify", |bench| {
        bench.iter(|| {
            let ops = Operands::new(&a, &b, Comparator::single(&clock));
            black_box(RelationEngine::classify(&ops))
        })
    });
}

fn bench_point_within(c: &mut Criterion) {
    let clock = SteppedClock::new(WallTime::EPOCH);
    let extent = extent_ms(0, 100);
    let t = ms(50);
    let cmp = Comparator::single(&clock);

    c.bench_function("point_within", |bench| {
        bench.iter(|| black_box(RelationEngine::evaluate_point(PointRelation::Within, &extent, &t, &cmp)))
    });
}

fn bench_object_query(c: &mut Criterion) {
    let timeline = Timeline::new();
    let Ok(Ok((a, b))) = block_on(async {
        let a = timeline.closed(0, 20).await?;
        let b = timeline.closed(10, 30).await?;
        Ok::<_, chronon_runtime::Rejection>((a, b))
    }) else {
        return;
    };
    let Ok(runtime) = tokio::runtime::Builder::new_current_thread().build() else {
        return;
    };

    c.bench_function("object_overlaps", |bench| {
        bench.iter(|| black_box(runtime.block_on(a.overlaps(&b))))
    });
}

criterion_group!(
    benches,
    bench_evaluate_before,
    bench_evaluate_catalogue,
    bench_classify,
    bench_point_within,
    bench_object_query,
);
criterion_main!(benches);
