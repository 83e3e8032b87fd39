// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sbd_core::SeriesView;
use sbd_costs::{CostLevel, CostLevelTrend, SegmentCost};

const N: usize = 1_000_000;
const QUERY_COUNT: usize = 1_000_000;

fn lcg_next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

fn generate_queries(n: usize, count: usize) -> Vec<(usize, usize)> {
    let mut queries = Vec::with_capacity(count);
    let mut state = 0xfeed_f00d_dead_beef_u64;

    for _ in 0..count {
        let a = (lcg_next(&mut state) as usize) % n;
        let b = (lcg_next(&mut state) as usize) % n;
        let start = a.min(b);
        let mut end = a.max(b) + 1;
        if start == end {
            end = (start + 1).min(n);
        }
        queries.push((start, end));
    }

    queries
}

fn benchmark_segment_costs(c: &mut Criterion) {
    let values: Vec<f64> = (0..N)
        .map(|idx| {
            let x = idx as f64;
            x.sin() + x.cos() * 0.1
        })
        .collect();

    let view = SeriesView::new(&values).expect("benchmark series should be valid");

    let level = CostLevel;
    let trend = CostLevelTrend;

    let mut group = c.benchmark_group("segment_costs");

    group.bench_function("level_precompute_n1e6", |b| {
        b.iter(|| {
            let _cache = level
                .precompute(black_box(&view))
                .expect("precompute should succeed");
        })
    });

    group.bench_function("trend_precompute_n1e6", |b| {
        b.iter(|| {
            let _cache = trend
                .precompute(black_box(&view))
                .expect("precompute should succeed");
        })
    });

    let level_cache = level.precompute(&view).expect("precompute should succeed");
    let trend_cache = trend.precompute(&view).expect("precompute should succeed");
    let queries = generate_queries(N, QUERY_COUNT);

    group.bench_function("level_segment_queries_n1e6_1m", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &(start, end) in black_box(&queries) {
                acc += level.segment_cost(black_box(&level_cache), start, end);
            }
            black_box(acc)
        })
    });

    group.bench_function("trend_segment_queries_n1e6_1m", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &(start, end) in black_box(&queries) {
                acc += trend.segment_cost(black_box(&trend_cache), start, end);
            }
            black_box(acc)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_segment_costs);
criterion_main!(benches);
