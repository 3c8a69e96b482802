//! # Recommendation Ordering Benchmarks
//!
//! | Operation | Expected cost |
//! |-----------|---------------|
//! | Insert | O(n) copy of the mapping |
//! | Delete | O(n) compaction |
//! | Reorder | O(n) validation |
//!
//! Advice letters rarely carry more than a few dozen recommendations; the
//! larger sizes are here to catch accidental quadratic behaviour.

use al_01_recommendation_ordering::{
    DocumentId, NewRecommendation, Ordering, OrderingEngine, OrderingEngineApi, Position,
    PositionMap, RecommendationId,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::seq::SliceRandom;

const DOC: DocumentId = DocumentId(1);
const SIZES: [usize; 4] = [10, 100, 1_000, 10_000];

fn ordering_of(size: usize) -> Ordering {
    let ids: Vec<RecommendationId> = (0..size as u64).map(RecommendationId).collect();
    Ordering::from_ids(DOC, &ids).expect("valid ordering")
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("al-01-insert");
    let engine = OrderingEngine::new();

    for size in SIZES {
        let current = ordering_of(size);
        let new = NewRecommendation::new(RecommendationId(size as u64), DOC);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &current, |b, current| {
            b.iter(|| black_box(engine.insert(DOC, current, new)))
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("al-01-delete");
    let engine = OrderingEngine::new();

    for size in SIZES {
        let current = ordering_of(size);
        // Deleting the head shifts every other entry
        let head = RecommendationId(0);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &current, |b, current| {
            b.iter(|| black_box(engine.delete(DOC, current, head)))
        });
    }
    group.finish();
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("al-01-reorder");
    let engine = OrderingEngine::new();
    let mut rng = rand::thread_rng();

    for size in SIZES {
        let current = ordering_of(size);
        let mut positions: Vec<Position> = (0..size as Position).collect();
        positions.shuffle(&mut rng);
        let mapping: PositionMap = (0..size as u64)
            .map(RecommendationId)
            .zip(positions)
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &current, |b, current| {
            b.iter(|| black_box(engine.reorder(DOC, current, &mapping)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_delete, bench_reorder);
criterion_main!(benches);
